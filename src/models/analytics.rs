use serde::{Deserialize, Serialize};

/// Headline counters for the reports overview. Server-computed; the
/// wait-time and completeness figures are free-form display strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareStats {
    pub total_patients: u32,
    pub total_records: u32,
    pub consultations_mtd: u32,
    pub completed: u32,
    pub pending: u32,
    pub lab_results: u32,
    pub avg_wait_time: Option<String>,
    pub data_completeness: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillageDistribution {
    pub name: String,
    pub patients: u32,
    pub growth: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDistribution {
    pub condition: String,
    pub percentage: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub value: u32,
}

/// Analytics snapshot for the reports route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsData {
    pub stats: CareStats,
    #[serde(default)]
    pub villages: Vec<VillageDistribution>,
    #[serde(default)]
    pub conditions: Vec<ConditionDistribution>,
    #[serde(default)]
    pub disease_trend: Vec<TrendPoint>,
}

impl AnalyticsData {
    /// Largest trend value, used to scale the bar chart. Zero when empty.
    pub fn max_trend_value(&self) -> u32 {
        self.disease_trend.iter().map(|p| p.value).max().unwrap_or(0)
    }
}
