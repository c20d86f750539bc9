//! DTOs of the analytics report.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::deal::DealStage;

/// Reporting window ending at the current month.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub enum Timeframe {
    #[serde(rename = "3months")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "12months")]
    TwelveMonths,
}

impl Timeframe {
    /// Months looked back from the current month.
    pub fn months(self) -> u32 {
        match self {
            Timeframe::ThreeMonths => 3,
            Timeframe::SixMonths => 6,
            Timeframe::TwelveMonths => 12,
        }
    }
}

impl From<&str> for Timeframe {
    /// Unknown values fall back to six months.
    fn from(value: &str) -> Self {
        match value.trim() {
            "3months" => Timeframe::ThreeMonths,
            "12months" => Timeframe::TwelveMonths,
            _ => Timeframe::SixMonths,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsParams {
    pub timeframe: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyLeads {
    /// First day of the month.
    pub month: NaiveDate,
    pub new_leads: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadGeneration {
    pub monthly: Vec<MonthlyLeads>,
    pub monthly_average: usize,
    pub total_new_leads: usize,
    /// Percent change between the last two months.
    pub trend: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StageSummary {
    pub stage: DealStage,
    pub count: usize,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineAnalysis {
    /// Value of deals that are neither won nor lost.
    pub total_value: f64,
    pub average_deal_size: f64,
    pub open_deals: usize,
    pub weighted_value: f64,
    pub won_revenue: f64,
    pub stages: Vec<StageSummary>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub timeframe: Timeframe,
    pub lead_generation: LeadGeneration,
    pub pipeline_analysis: PipelineAnalysis,
    pub generated_at: DateTime<Utc>,
}
