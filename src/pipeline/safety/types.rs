use std::fmt;

/// Informational disclaimer returned alongside every analysis answer.
pub const ANALYSIS_DISCLAIMER: &str =
    "Important: This analysis is for informational purposes only and is not a medical \
     diagnosis. Consult a licensed healthcare professional for clinical evaluation and \
     urgent care if you experience red-flag symptoms.";

/// Section labels the model is instructed to use in its report.
///
/// Closed set: a line is restyled as a heading only when its normalized
/// text equals one of these labels exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionHeading {
    Summary,
    DetailedFindings,
    PossibleDiagnoses,
    RiskLevel,
    RedFlags,
    NextSteps,
    Recommendations,
    Interpretation,
    Impression,
}

impl SectionHeading {
    pub const ALL: [SectionHeading; 9] = [
        Self::Summary,
        Self::DetailedFindings,
        Self::PossibleDiagnoses,
        Self::RiskLevel,
        Self::RedFlags,
        Self::NextSteps,
        Self::Recommendations,
        Self::Interpretation,
        Self::Impression,
    ];

    /// Lower-case comparison key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::DetailedFindings => "detailed findings",
            Self::PossibleDiagnoses => "possible diagnoses/considerations",
            Self::RiskLevel => "risk level",
            Self::RedFlags => "red flags",
            Self::NextSteps => "next steps",
            Self::Recommendations => "recommendations",
            Self::Interpretation => "interpretation",
            Self::Impression => "impression",
        }
    }

    /// Match a label that is already trimmed and colon-stripped
    /// (see `heading_label`). Only case is folded here.
    pub fn from_label(label: &str) -> Option<Self> {
        let key = label.to_lowercase();
        Self::ALL.into_iter().find(|h| h.as_str() == key)
    }
}

impl fmt::Display for SectionHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trimmed line text with at most one trailing colon removed.
pub fn heading_label(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed.strip_suffix(':').unwrap_or(trimmed)
}
