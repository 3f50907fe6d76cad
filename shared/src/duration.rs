use crate::models::ContractType;

pub const HOUR_MINUTES: u32 = 60;
pub const DAY_MINUTES: u32 = 1_440;
/// Thirty days, the allowed time of a monthly contract.
pub const MONTHLY_MINUTES: u32 = 43_200;
const MAX_SHORT_STAY: u32 = 720;

/// Repairs an allowed duration that does not fit its contract.
///
/// Monthly contracts accept 1 to 12 hours or the full thirty days; anything else
/// becomes thirty days. Hourly contracts above 12 hours fall back to one hour.
/// Other contracts are left alone.
pub fn normalize_duration(minutes: u32, contract: ContractType) -> u32 {
    match contract {
        ContractType::Monthly => {
            if (HOUR_MINUTES..=MAX_SHORT_STAY).contains(&minutes) || minutes == MONTHLY_MINUTES {
                minutes
            } else {
                MONTHLY_MINUTES
            }
        }
        ContractType::Hourly if minutes > MAX_SHORT_STAY => HOUR_MINUTES,
        _ => minutes,
    }
}

/// Duration preselected when a contract type is picked in a form.
pub fn default_duration(contract: ContractType) -> u32 {
    match contract {
        ContractType::Monthly => MONTHLY_MINUTES,
        ContractType::Hourly => HOUR_MINUTES,
        ContractType::Daily => DAY_MINUTES,
        ContractType::Overnight => MAX_SHORT_STAY,
        ContractType::Casual => HOUR_MINUTES,
    }
}

/// Durations offered for a contract.
pub fn duration_choices(contract: ContractType) -> &'static [u32] {
    const SHORT: [u32; 5] = [60, 120, 240, 480, 720];
    const MONTHLY: [u32; 6] = [60, 120, 240, 480, 720, MONTHLY_MINUTES];
    const FULL: [u32; 7] = [60, 120, 240, 480, 720, DAY_MINUTES, MONTHLY_MINUTES];
    match contract {
        ContractType::Hourly => &SHORT,
        ContractType::Monthly => &MONTHLY,
        _ => &FULL,
    }
}

/// `45 min`, `2h`, `2h 30min`, `3d`, `3d 4h`.
pub fn format_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    if minutes < HOUR_MINUTES as i64 {
        return format!("{} min", minutes);
    }
    if minutes < DAY_MINUTES as i64 {
        let hours = minutes / 60;
        let rest = minutes % 60;
        return if rest > 0 {
            format!("{}h {}min", hours, rest)
        } else {
            format!("{}h", hours)
        };
    }
    let days = minutes / DAY_MINUTES as i64;
    let hours = (minutes % DAY_MINUTES as i64) / 60;
    if hours > 0 {
        format!("{}d {}h", days, hours)
    } else {
        format!("{}d", days)
    }
}

/// Label used in duration pickers: `1 hora`, `12 horas`, `24 horas`, `30 dias`.
pub fn choice_label(minutes: u32) -> String {
    match minutes {
        MONTHLY_MINUTES => "30 dias".to_string(),
        HOUR_MINUTES => "1 hora".to_string(),
        m if m % HOUR_MINUTES == 0 => format!("{} horas", m / HOUR_MINUTES),
        m => format_minutes(m as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_monthly() {
        assert_eq!(normalize_duration(120, ContractType::Monthly), 120);
        assert_eq!(normalize_duration(60, ContractType::Monthly), 60);
        assert_eq!(normalize_duration(720, ContractType::Monthly), 720);
        assert_eq!(normalize_duration(43_200, ContractType::Monthly), 43_200);
        assert_eq!(normalize_duration(30, ContractType::Monthly), 43_200);
        assert_eq!(normalize_duration(1_440, ContractType::Monthly), 43_200);
        assert_eq!(normalize_duration(0, ContractType::Monthly), 43_200);
    }

    #[test]
    fn test_normalize_hourly() {
        assert_eq!(normalize_duration(720, ContractType::Hourly), 720);
        assert_eq!(normalize_duration(43_200, ContractType::Hourly), 60);
        assert_eq!(normalize_duration(30, ContractType::Hourly), 30);
    }

    #[test]
    fn test_normalize_leaves_other_contracts() {
        for contract in [ContractType::Daily, ContractType::Overnight, ContractType::Casual] {
            assert_eq!(normalize_duration(43_200, contract), 43_200);
            assert_eq!(normalize_duration(5, contract), 5);
        }
    }

    #[test]
    fn test_normalize_is_stable() {
        for contract in ContractType::ALL {
            for minutes in [0, 30, 60, 721, 1_440, 43_200, 100_000] {
                let once = normalize_duration(minutes, contract);
                assert_eq!(normalize_duration(once, contract), once);
            }
        }
    }

    #[test]
    fn test_defaults_survive_normalization() {
        for contract in ContractType::ALL {
            let minutes = default_duration(contract);
            assert_eq!(normalize_duration(minutes, contract), minutes);
        }
    }

    #[test]
    fn test_every_choice_survives_normalization() {
        for contract in ContractType::ALL {
            for &minutes in duration_choices(contract) {
                assert_eq!(normalize_duration(minutes, contract), minutes, "{:?} offers {}", contract, minutes);
            }
        }
        assert!(!duration_choices(ContractType::Monthly).contains(&DAY_MINUTES));
    }

    #[test]
    fn test_choices() {
        assert_eq!(duration_choices(ContractType::Hourly).last(), Some(&720));
        assert!(duration_choices(ContractType::Monthly).contains(&43_200));
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(45), "45 min");
        assert_eq!(format_minutes(60), "1h");
        assert_eq!(format_minutes(150), "2h 30min");
        assert_eq!(format_minutes(1_440), "1d");
        assert_eq!(format_minutes(1_500), "1d 1h");
        assert_eq!(format_minutes(43_200), "30d");
        assert_eq!(format_minutes(-5), "0 min");
    }

    #[test]
    fn test_choice_label() {
        assert_eq!(choice_label(60), "1 hora");
        assert_eq!(choice_label(720), "12 horas");
        assert_eq!(choice_label(43_200), "30 dias");
    }
}
