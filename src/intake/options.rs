//! Answer vocabularies offered by the questionnaire. Lists that encode
//! severity are ordered mildest first.

pub const INDUSTRY: [&str; 8] = [
    "Finance & Banking",
    "Healthcare & Pharma",
    "Manufacturing",
    "Retail & E-commerce",
    "Logistics & Freight",
    "Telecommunications",
    "Energy & Utilities",
    "Other",
];

pub const PROCESS_FREQUENCY: [&str; 5] = [
    "Annually or quarterly",
    "Monthly",
    "Weekly",
    "Daily",
    "Continuous (multiple times per day)",
];

pub const PROCESSING_TIME: [&str; 6] = [
    "Less than 1 day",
    "1-2 days",
    "3-5 days",
    "6-10 days",
    "11-15 days",
    "More than 15 days",
];

pub const TAKES_TOO_LONG: &str = "Takes too long to complete";

pub const CHALLENGES: [&str; 10] = [
    TAKES_TOO_LONG,
    "High labor costs",
    "Frequent errors requiring rework",
    "Bottlenecks and delays",
    "Difficult to scale without hiring",
    "Depends on specific people's knowledge",
    "Compliance or audit concerns",
    "Poor visibility into process status",
    "Affects customer/vendor satisfaction",
    "Other",
];

pub const NO_COMPLIANCE: &str = "None";

pub const COMPLIANCE: [&str; 5] = [
    NO_COMPLIANCE,
    "Internal audit only",
    "Industry standards (ISO, etc.)",
    "Government regulations (SOX, FDA, GDPR, etc.)",
    "Multiple high-level regulatory requirements",
];

pub const MINIMAL_DELAY_IMPACT: &str = "Minimal impact, no direct costs";

pub const DELAY_IMPACT: [&str; 5] = [
    MINIMAL_DELAY_IMPACT,
    "Some operational inconvenience",
    "Significant cash flow impact",
    "Financial penalties or late fees",
    "Major penalties and/or vendor relationship damage",
];

pub const NO_DOCUMENTATION: &str = "No documentation exists";
pub const PARTIAL_DOCUMENTATION: &str = "Partially documented";
pub const FULL_DOCUMENTATION: &str = "Fully documented and current";

pub const DOCUMENTATION_STATUS: [&str; 4] = [
    NO_DOCUMENTATION,
    PARTIAL_DOCUMENTATION,
    "Documented but outdated",
    FULL_DOCUMENTATION,
];

pub const INTRANET_ONLY: &str = "All systems are internal/intranet only";

pub const SYSTEM_ACCESS: [&str; 4] = [
    "All systems are cloud-based and accessible externally",
    "Most systems require VPN but are accessible remotely",
    "Some systems are on internal network only",
    INTRANET_ONLY,
];

pub const BOTTLENECK: [&str; 4] = [
    "No, it operates independently",
    "Minimal impact on other processes",
    "Moderate delays to downstream processes",
    "Significant blocker for multiple processes",
];

pub const COMPLAINTS: [&str; 4] = [
    "Rarely or never",
    "Occasionally (few per quarter)",
    "Regularly (monthly)",
    "Frequently (weekly or daily)",
];

pub const GROWTH_LIMITATION: [&str; 4] = [
    "No constraints",
    "Minor constraints",
    "Moderate constraints, would need significant hiring to scale",
    "Major constraints, actively limiting growth",
];

pub const ROI_TIMELINE: [&str; 6] = [
    "More than 3 years",
    "2-3 years",
    "18-24 months",
    "12-18 months",
    "6-12 months",
    "Less than 6 months",
];

pub const NO_DOCUMENTS: &str = "No documents involved";

pub const DOCUMENT_PROCESSING: [&str; 5] = [
    NO_DOCUMENTS,
    "Structured digital forms",
    "Semi-structured documents (invoices, receipts)",
    "Unstructured documents (contracts, emails)",
    "Handwritten or scanned paper documents",
];

pub const NO_COMMUNICATION: &str = "None of the above";

pub const COMMUNICATION: [&str; 5] = [
    "Email",
    "Phone calls",
    "Chat or messaging",
    "Letters or physical mail",
    NO_COMMUNICATION,
];

pub const HUMAN_IN_LOOP: [&str; 5] = [
    "Never, fully rule-based",
    "Rarely (less than 10% of cases)",
    "Sometimes (10-30% of cases)",
    "Often (30-60% of cases)",
    "Always, every transaction needs review",
];

/// Position of a compliance label in the severity ranking; unknown labels
/// rank below every known one.
pub fn compliance_severity(label: &str) -> Option<usize> {
    COMPLIANCE
        .iter()
        .position(|known| known.eq_ignore_ascii_case(label.trim()))
}
