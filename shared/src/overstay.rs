// Elapsed and overstay time of a check-in, measured against a caller-supplied "now".
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::duration::format_minutes;
use crate::language::Language;
use crate::models::ContractType;

/// Entry date plus entry time, midnight when the time is missing.
pub fn entry_instant(entry_date: NaiveDate, entry_time: Option<NaiveTime>) -> NaiveDateTime {
    entry_date.and_time(entry_time.unwrap_or(NaiveTime::MIN))
}

/// Whole minutes from entry to `now`, floored. Negative while the entry lies in the future.
pub fn elapsed_minutes(entry_date: NaiveDate, entry_time: Option<NaiveTime>, now: NaiveDateTime) -> i64 {
    let seconds = (now - entry_instant(entry_date, entry_time)).num_seconds();
    seconds.div_euclid(60)
}

/// "Inicia em 2h" for future entries, the formatted elapsed time otherwise.
pub fn elapsed_label(elapsed: i64, language: Language) -> String {
    if elapsed < 0 {
        let remaining = format_minutes(-elapsed);
        match language {
            Language::PtBr => format!("Inicia em {}", remaining),
            Language::En => format!("starts in {}", remaining),
        }
    } else {
        format_minutes(elapsed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Normal,
    Light,
    Medium,
    Severe,
}

/// Overstay tolerance thresholds, in minutes, chosen by the allowed duration.
///
/// Allowed durations up to `short_stay_limit` use fractions of the allowed time;
/// up to `day_limit` the `day_*` thresholds apply; longer stays use `long_*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TolerancePolicy {
    pub short_stay_limit: u32,
    pub short_light_ratio: f64,
    pub short_medium_ratio: f64,
    pub day_limit: u32,
    pub day_light: i64,
    pub day_medium: i64,
    pub long_light: i64,
    pub long_medium: i64,
}

impl Default for TolerancePolicy {
    fn default() -> Self {
        Self {
            short_stay_limit: 60,
            short_light_ratio: 0.25,
            short_medium_ratio: 0.5,
            day_limit: 1_440,
            day_light: 60,
            day_medium: 180,
            long_light: 1_440,
            long_medium: 4_320,
        }
    }
}

impl TolerancePolicy {
    /// (light, medium) thresholds for an allowed duration.
    pub fn thresholds(&self, allowed_minutes: u32) -> (i64, i64) {
        if allowed_minutes <= self.short_stay_limit {
            let allowed = allowed_minutes as f64;
            (
                (allowed * self.short_light_ratio).floor() as i64,
                (allowed * self.short_medium_ratio).floor() as i64,
            )
        } else if allowed_minutes <= self.day_limit {
            (self.day_light, self.day_medium)
        } else {
            (self.long_light, self.long_medium)
        }
    }

    pub fn classify(&self, overstay_minutes: i64, allowed_minutes: u32) -> SeverityTier {
        if overstay_minutes <= 0 {
            return SeverityTier::Normal;
        }
        let (light, medium) = self.thresholds(allowed_minutes);
        if overstay_minutes <= light {
            SeverityTier::Light
        } else if overstay_minutes <= medium {
            SeverityTier::Medium
        } else {
            SeverityTier::Severe
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverstayStatus {
    AwaitingStart,
    WithinTime,
    Exceeded,
}

/// Status column of the exported reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Ok,
    Exceeded,
    Scheduled,
}

impl ReportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Ok => "OK",
            ReportStatus::Exceeded => "Excedido",
            ReportStatus::Scheduled => "Agendado",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overstay {
    pub elapsed_minutes: i64,
    pub allowed_minutes: u32,
    /// Elapsed minus allowed; only meaningful when `status` is `Exceeded`.
    pub overstay_minutes: i64,
    pub contract: ContractType,
    pub status: OverstayStatus,
    pub tier: SeverityTier,
}

impl Overstay {
    pub fn label(&self, language: Language) -> String {
        let monthly = self.contract.is_monthly();
        match (self.status, language) {
            (OverstayStatus::AwaitingStart, Language::PtBr) => "Aguardando início".to_string(),
            (OverstayStatus::AwaitingStart, Language::En) => "awaiting start".to_string(),
            (OverstayStatus::WithinTime, Language::PtBr) if monthly => "Em dia".to_string(),
            (OverstayStatus::WithinTime, Language::PtBr) => "Dentro do prazo".to_string(),
            (OverstayStatus::WithinTime, Language::En) if monthly => "on schedule".to_string(),
            (OverstayStatus::WithinTime, Language::En) => "within time".to_string(),
            (OverstayStatus::Exceeded, language) => {
                let amount = format_minutes(self.overstay_minutes);
                match (language, monthly) {
                    (Language::PtBr, true) => format!("Prazo excedido: {}", amount),
                    (Language::PtBr, false) => format!("Tempo excedido: {}", amount),
                    (Language::En, true) => format!("deadline exceeded: {}", amount),
                    (Language::En, false) => format!("time exceeded: {}", amount),
                }
            }
        }
    }

    pub fn elapsed_label(&self, language: Language) -> String {
        elapsed_label(self.elapsed_minutes, language)
    }

    pub fn report_status(&self) -> ReportStatus {
        match self.status {
            OverstayStatus::AwaitingStart => ReportStatus::Scheduled,
            OverstayStatus::WithinTime => ReportStatus::Ok,
            OverstayStatus::Exceeded => ReportStatus::Exceeded,
        }
    }

    pub fn is_exceeded(&self) -> bool {
        self.status == OverstayStatus::Exceeded
    }
}

pub fn evaluate_overstay(
    entry_date: NaiveDate,
    entry_time: Option<NaiveTime>,
    allowed_minutes: u32,
    contract: ContractType,
    now: NaiveDateTime,
    policy: &TolerancePolicy,
) -> Overstay {
    let elapsed = elapsed_minutes(entry_date, entry_time, now);
    let overstay = elapsed - allowed_minutes as i64;
    let status = if elapsed < 0 {
        OverstayStatus::AwaitingStart
    } else if overstay <= 0 {
        OverstayStatus::WithinTime
    } else {
        OverstayStatus::Exceeded
    };
    let tier = match status {
        OverstayStatus::Exceeded => policy.classify(overstay, allowed_minutes),
        _ => SeverityTier::Normal,
    };

    Overstay {
        elapsed_minutes: elapsed,
        allowed_minutes,
        overstay_minutes: overstay,
        contract,
        status,
        tier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        day().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn ten_oclock() -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(10, 0, 0)
    }

    #[test]
    fn test_within_time() {
        let result = evaluate_overstay(day(), ten_oclock(), 60, ContractType::Hourly, at(10, 30), &TolerancePolicy::default());
        assert_eq!(result.status, OverstayStatus::WithinTime);
        assert_eq!(result.elapsed_minutes, 30);
        assert_eq!(result.label(Language::En), "within time");
        assert_eq!(result.label(Language::PtBr), "Dentro do prazo");
        assert_eq!(result.tier, SeverityTier::Normal);
        assert_eq!(result.report_status(), ReportStatus::Ok);
    }

    #[test]
    fn test_exceeded_is_severe_past_half_the_allowed_time() {
        let result = evaluate_overstay(day(), ten_oclock(), 60, ContractType::Hourly, at(11, 45), &TolerancePolicy::default());
        assert_eq!(result.overstay_minutes, 45);
        assert_eq!(result.label(Language::En), "time exceeded: 45 min");
        assert_eq!(result.label(Language::PtBr), "Tempo excedido: 45 min");
        assert_eq!(result.tier, SeverityTier::Severe);
        assert_eq!(result.report_status(), ReportStatus::Exceeded);
    }

    #[test]
    fn test_awaiting_start() {
        let result = evaluate_overstay(day(), ten_oclock(), 60, ContractType::Hourly, at(9, 0), &TolerancePolicy::default());
        assert_eq!(result.status, OverstayStatus::AwaitingStart);
        assert_eq!(result.elapsed_minutes, -60);
        assert_eq!(result.label(Language::En), "awaiting start");
        assert_eq!(result.elapsed_label(Language::En), "starts in 1h");
        assert_eq!(result.elapsed_label(Language::PtBr), "Inicia em 1h");
        assert_eq!(result.report_status(), ReportStatus::Scheduled);
    }

    #[test]
    fn test_monthly_wording() {
        let policy = TolerancePolicy::default();
        let within = evaluate_overstay(day(), None, 43_200, ContractType::Monthly, at(12, 0), &policy);
        assert_eq!(within.label(Language::En), "on schedule");
        assert_eq!(within.label(Language::PtBr), "Em dia");

        let later = day().and_hms_opt(0, 0, 0).unwrap() + chrono::Duration::days(31);
        let exceeded = evaluate_overstay(day(), None, 43_200, ContractType::Monthly, later, &policy);
        assert_eq!(exceeded.overstay_minutes, 1_440);
        assert_eq!(exceeded.label(Language::En), "deadline exceeded: 1d");
        assert_eq!(exceeded.tier, SeverityTier::Light);
    }

    #[test]
    fn test_missing_time_counts_from_midnight() {
        assert_eq!(elapsed_minutes(day(), None, at(1, 30)), 90);
    }

    #[test]
    fn test_elapsed_is_floored() {
        let now = day().and_hms_opt(10, 0, 59).unwrap();
        assert_eq!(elapsed_minutes(day(), ten_oclock(), now), 0);
        let before = day().and_hms_opt(9, 59, 30).unwrap();
        assert_eq!(elapsed_minutes(day(), ten_oclock(), before), -1);
    }

    #[test]
    fn test_tier_thresholds() {
        let policy = TolerancePolicy::default();
        assert_eq!(policy.thresholds(60), (15, 30));
        assert_eq!(policy.thresholds(45), (11, 22));
        assert_eq!(policy.thresholds(720), (60, 180));
        assert_eq!(policy.thresholds(43_200), (1_440, 4_320));

        assert_eq!(policy.classify(15, 60), SeverityTier::Light);
        assert_eq!(policy.classify(16, 60), SeverityTier::Medium);
        assert_eq!(policy.classify(181, 720), SeverityTier::Severe);
        assert_eq!(policy.classify(0, 720), SeverityTier::Normal);
    }

    #[test]
    fn test_policy_reads_partial_json() {
        let policy: TolerancePolicy = serde_json::from_str(r#"{"day_light": 30}"#).unwrap();
        assert_eq!(policy.day_light, 30);
        assert_eq!(policy.day_medium, 180);
    }
}
