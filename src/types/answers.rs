use serde::{Deserialize, Serialize};
use std::fmt;

/// API availability as reported for a single system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiAvailability {
    Yes,
    No,
    #[serde(rename = "Don't know", alias = "Unknown", alias = "unknown")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    pub name: String,
    pub has_api: ApiAvailability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_cloud: Option<YesNo>,
}

impl System {
    /// Explicitly answered as not cloud-based. An unanswered `isCloud` is
    /// not treated as on-premise.
    pub fn is_on_premise(&self) -> bool {
        self.is_cloud == Some(YesNo::No)
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One questionnaire submission, as accepted by the intake layer.
///
/// Labels are kept as the answered strings so a rule table can be retuned
/// without touching this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    // identity
    pub organization_name: String,
    #[serde(default)]
    pub your_name: String,
    pub process_name: String,
    pub industry: String,
    #[serde(default)]
    pub process_description: String,

    // volume and frequency
    pub monthly_volume: f64,
    pub process_frequency: String,

    // cost and effort
    pub team_size: f64,
    pub time_percentage: f64,
    pub average_processing_time: String,
    pub cost_per_transaction: f64,

    // pain points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_challenges: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_of_delays: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biggest_pain_point: Option<String>,

    // risk and compliance
    pub error_rate: f64,
    #[serde(default)]
    pub compliance_requirements: Vec<String>,

    // feasibility
    pub documentation_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relies_on_tribal_knowledge: Option<YesNo>,
    pub process_standardization: f64,
    pub exception_handling: f64,
    #[serde(default)]
    pub systems: Vec<System>,
    pub system_access: String,

    // strategic impact
    pub process_bottleneck: String,
    pub stakeholder_complaints: String,
    pub growth_limitation: String,
    #[serde(rename = "expectedROI")]
    pub expected_roi: String,

    // task complexity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_processing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_needs: Option<Vec<String>>,
    pub human_in_loop: String,
}

impl AnswerRecord {
    /// Monthly spend on the process: volume times cost per transaction.
    pub fn monthly_value(&self) -> f64 {
        self.monthly_volume * self.cost_per_transaction
    }

    /// Person-hours per month, assuming 160 working hours per full-time person.
    pub fn fte_hours(&self) -> f64 {
        self.team_size * (self.time_percentage / 100.0) * 160.0
    }

    pub fn challenges(&self) -> &[String] {
        self.current_challenges.as_deref().unwrap_or_default()
    }

    pub fn communication(&self) -> &[String] {
        self.communication_needs.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_questionnaire_json_with_optional_fields_missing() {
        let json = r#"{
            "organizationName": "Acme",
            "processName": "Invoice intake",
            "industry": "Manufacturing",
            "monthlyVolume": 1200,
            "processFrequency": "Daily",
            "teamSize": 3,
            "timePercentage": 40,
            "averageProcessingTime": "1-2 days",
            "costPerTransaction": 12.5,
            "errorRate": 4,
            "complianceRequirements": ["Internal audit only"],
            "documentationStatus": "Documented but outdated",
            "processStandardization": 80,
            "exceptionHandling": 10,
            "systems": [{"name": "SAP", "hasApi": "Don't know"}],
            "systemAccess": "Most systems require VPN but are accessible remotely",
            "processBottleneck": "Minimal impact on other processes",
            "stakeholderComplaints": "Rarely or never",
            "growthLimitation": "Minor constraints",
            "expectedROI": "6-12 months",
            "humanInLoop": "Rarely (less than 10% of cases)"
        }"#;

        let record: AnswerRecord = serde_json::from_str(json).expect("answers should parse");
        assert_eq!(record.systems[0].has_api, ApiAvailability::Unknown);
        assert!(!record.systems[0].is_on_premise());
        assert!(record.impact_of_delays.is_none());
        assert!(record.challenges().is_empty());
        assert_eq!(record.monthly_value(), 15000.0);
        assert_eq!(record.fte_hours(), 192.0);
    }

    #[test]
    fn api_availability_accepts_unknown_alias() {
        let system: System =
            serde_json::from_str(r#"{"name": "Legacy ERP", "hasApi": "unknown", "isCloud": "No"}"#)
                .expect("system should parse");
        assert_eq!(system.has_api, ApiAvailability::Unknown);
        assert_eq!(system.is_cloud, Some(YesNo::No));
    }
}
