//! Recommendations
//! Fixed guidance text shown once a dataset is loaded.

use crate::report::Report;

const RECOMMENDATIONS: [&str; 5] = [
    "1. Focus on top funding sectors like Tech, Finance, and Healthcare.",
    "2. Mumbai, Bangalore, and Delhi NCR are major hubs for startups.",
    "3. Encourage repeat investments from top investors like Sequoia, Accel, and Tiger Global.",
    "4. Series A and Seed Funding dominate; early-stage funding is strong.",
    "5. Consider funding trends over time to predict peak investment periods.",
];

/// The static recommendation report.
pub fn recommendations() -> Report {
    Report::new("Recommendations").list(
        "Suggested focus areas",
        RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
    )
}
