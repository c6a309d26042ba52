//! Long-term-care subsidy estimates by CMS disability level and welfare status.
//!
//! All amounts are whole NT dollars. Co-pay rates are kept in percent so the arithmetic is
//! integer-only and truncates the same way every time.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Monthly care and professional service cap per CMS level (2–8).
pub const CARE_SERVICE_CAPS: [(u8, u32); 7] = [
    (2, 10_020),
    (3, 15_460),
    (4, 18_580),
    (5, 24_100),
    (6, 28_070),
    (7, 32_090),
    (8, 36_180),
];

/// Assistive devices and home modification, per three years (CMS level 2 and above).
pub const ASSISTIVE_DEVICE_LIMIT: u32 = 40_000;
/// Annual respite-care cap.
pub const RESPITE_ANNUAL_LIMIT: u32 = 48_510;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    /// 一般戶
    #[default]
    General,
    /// 中低收入戶
    MiddleLow,
    /// 低收入戶
    Low,
}

impl IncomeType {
    pub fn label(self) -> &'static str {
        match self {
            IncomeType::General => "一般戶",
            IncomeType::MiddleLow => "中低收入戶",
            IncomeType::Low => "低收入戶",
        }
    }

    /// Co-pay on care services, percent.
    pub fn care_copay_percent(self) -> u32 {
        match self {
            IncomeType::General => 16,
            IncomeType::MiddleLow => 5,
            IncomeType::Low => 0,
        }
    }

    /// Co-pay on assistive devices, percent.
    pub fn assistive_copay_percent(self) -> u32 {
        match self {
            IncomeType::General => 30,
            IncomeType::MiddleLow => 10,
            IncomeType::Low => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareServiceEstimate {
    pub monthly_limit: u32,
    pub copay_percent: u32,
    pub monthly_self_pay: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistiveEstimate {
    pub limit_per_three_years: u32,
    pub copay_percent: u32,
    pub max_subsidy: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsidyEstimate {
    pub cms_level: u8,
    pub income_type: IncomeType,
    pub income_label: &'static str,
    pub care_services: CareServiceEstimate,
    pub assistive_devices: AssistiveEstimate,
    pub respite_annual_limit: u32,
}

pub fn care_service_cap(cms_level: u8) -> Option<u32> {
    CARE_SERVICE_CAPS
        .iter()
        .find(|(level, _)| *level == cms_level)
        .map(|(_, cap)| *cap)
}

fn percent_of(amount: u32, percent: u32) -> u32 {
    amount * percent / 100
}

/// Estimates subsidies for a CMS level and welfare status.
pub fn estimate_subsidy(cms_level: u8, income_type: IncomeType) -> Result<SubsidyEstimate, AppError> {
    let monthly_limit = care_service_cap(cms_level).ok_or_else(|| {
        AppError::Validation(format!(
            "cms_level must be between 2 and 8, got {cms_level}"
        ))
    })?;

    let care_copay = income_type.care_copay_percent();
    let assistive_copay = income_type.assistive_copay_percent();

    Ok(SubsidyEstimate {
        cms_level,
        income_type,
        income_label: income_type.label(),
        care_services: CareServiceEstimate {
            monthly_limit,
            copay_percent: care_copay,
            monthly_self_pay: percent_of(monthly_limit, care_copay),
        },
        assistive_devices: AssistiveEstimate {
            limit_per_three_years: ASSISTIVE_DEVICE_LIMIT,
            copay_percent: assistive_copay,
            max_subsidy: ASSISTIVE_DEVICE_LIMIT - percent_of(ASSISTIVE_DEVICE_LIMIT, assistive_copay),
        },
        respite_annual_limit: RESPITE_ANNUAL_LIMIT,
    })
}

/// Formats an amount with thousands separators, e.g. 32090 → "32,090".
pub fn format_amount(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
