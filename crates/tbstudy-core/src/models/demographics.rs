use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Socio-demographic answers. Values are the option labels chosen on the
/// form and are not interpreted by the toolkit; an empty string means not
/// yet answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Demographics {
    /// Zero means not recorded.
    pub age: u8,
    pub gender: String,
    pub address: String,
    pub occupation: String,
    pub education: String,
    pub monthly_income: String,
    pub marital_status: String,
    pub residence_type: String,
    pub comorbidities: String,
    pub comorbidities_details: String,
    pub tb_type: String,
    pub addictive_substances: String,
    pub addictive_substances_details: String,
}
