//! System prompt for report analysis.
//!
//! ECG interpretation is the priority use case; chest X-rays, radiology
//! reports and lab summaries follow the same section layout. The section
//! names listed in the prompt are the ones `SectionHeading` recognizes.

use crate::pipeline::safety::SectionHeading;

/// Used when the client sends no location.
pub const UNKNOWN_LOCATION: &str = "Unknown";

const ROLE_PREAMBLE: &str =
    "You are a cautious, expert medical imaging and report analysis assistant specialized in \
     ECG interpretation (priority), chest X-rays, radiology reports, and lab summaries. \
     Always state that you are not a substitute for a clinician.\n\n";

const ECG_CHECKLIST: &[&str] = &[
    "Verify basics: patient name/age/sex, date/time, paper speed (25 mm/s default) and gain \
     (10 mm/mV), device/filters; flag poor quality, noise, or wrong lead placement.",
    "Rate & rhythm: compute ventricular rate and regularity; identify rhythm (sinus vs atrial \
     fibrillation/flutter, ectopics, AV blocks); mention P before every QRS and constant PR for sinus.",
    "Intervals (with reference ranges): PR 120–200 ms (short <120, long >200), QRS <120 ms \
     (widened suggests bundle branch block/ventricular rhythm), QTc (Bazett) normal ~350–450 ms \
     men, 360–460 ms women; flag prolonged/short.",
    "Cardiac axis: describe normal vs left/right axis deviation; comment if axis suggests \
     LVH/RVH or fascicular block.",
    "Chamber hypertrophy/atrial abnormality: P pulmonale/P mitrale; LVH/RVH criteria \
     (Sokolow–Lyon etc.) if relevant.",
    "QRS morphology: look for pathologic Q-waves (≥40 ms wide or ≥25% of ensuing R, in ≥2 \
     contiguous leads), R-wave progression (V1→V6), bundle branch/fascicular blocks and \
     ventricular pre-excitation.",
    "ST-segment & T-waves: identify STE/STD location and reciprocity by coronary territory; STE \
     thresholds (e.g., ≥1 mm in limb, ≥2 mm precordial in men >40; adjust per age/sex), \
     posterior MI clues (STD V1–V3 with tall R), pericarditis vs early repolarization \
     differentiation.",
    "Clinical synthesis: map findings to likely differentials (ACS/STEMI/NSTEMI, old infarct, \
     electrolyte/drug effects e.g., digoxin, LVH strain, myocarditis), state certainty and red \
     flags requiring urgent care.",
    "Recommendations (India-aware): consider serial ECGs, high-sensitivity troponin, 12-lead \
     with posterior/right-sided leads when indicated, chest pain protocols, echo/TMT or \
     cardiology referral based on risk.",
];

/// Sections the model must answer in, in order.
const OUTPUT_SECTIONS: &[(SectionHeading, &str)] = &[
    (SectionHeading::Summary, "Summary"),
    (SectionHeading::DetailedFindings, "Detailed Findings"),
    (SectionHeading::PossibleDiagnoses, "Possible Diagnoses/Considerations"),
    (SectionHeading::RiskLevel, "Risk Level (Low/Medium/High with rationale)"),
    (SectionHeading::RedFlags, "Red Flags"),
    (SectionHeading::NextSteps, "Next Steps"),
];

const COMPARISON_ADDENDUM: &str =
    "\nWhen two ECGs/X-rays/reports are provided for comparison (A vs B), provide: \
     1) Key differences; 2) Improvement vs deterioration; 3) Quality/artifacts; \
     4) Clear conclusion which is better (A/B) with rationale; 5) Next steps.\n";

/// Build the system prompt for one analysis request.
pub fn build_system_prompt(location: &str, compare: bool) -> String {
    let location = display_location(location);
    let mut prompt = String::from(ROLE_PREAMBLE);

    prompt.push_str(&format!(
        "User location: {location} — tailor next steps to Indian clinical practice and access \
         (e.g., government/private facilities, availability of ECG, troponin, echo, TMT).\n\n"
    ));

    prompt.push_str(
        "ECG-exclusive detailed checklist (use whenever an ECG/report image or text is provided):\n",
    );
    for (i, item) in ECG_CHECKLIST.iter().enumerate() {
        prompt.push_str(&format!("{}) {}\n", i + 1, item));
    }
    prompt.push('\n');

    let sections = OUTPUT_SECTIONS
        .iter()
        .map(|(_, label)| *label)
        .collect::<Vec<_>>()
        .join("; ");
    prompt.push_str(&format!(
        "Output strictly in sections: {sections}. Be concise, avoid speculative claims, and \
         clearly state limitations if image/report quality is suboptimal.\n"
    ));

    if compare {
        prompt.push_str(COMPARISON_ADDENDUM);
    }

    prompt
}

/// Trimmed location, or `UNKNOWN_LOCATION` when blank.
pub fn display_location(location: &str) -> &str {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        UNKNOWN_LOCATION
    } else {
        trimmed
    }
}
