// Colour palette of the check-in pages, including the overstay tier colours.
use serde::{Deserialize, Serialize};
use shared::overstay::{OverstayStatus, ReportStatus, SeverityTier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: String,
    pub surface: String,
    pub foreground: String,
    pub muted: String,
    pub primary: String,
    pub accent: String,
    pub danger: String,
    pub border: String,
    pub tier_normal: String,
    pub tier_light: String,
    pub tier_medium: String,
    pub tier_severe: String,
    pub awaiting: String,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            background: "#f5f7fa".to_string(),
            surface: "#ffffff".to_string(),
            foreground: "#192230".to_string(),
            muted: "#6b7280".to_string(),
            primary: "#192230".to_string(),
            accent: "#2563eb".to_string(),
            danger: "#c4302b".to_string(),
            border: "#d1d5db".to_string(),
            tier_normal: "#059669".to_string(),
            tier_light: "#ca8a04".to_string(),
            tier_medium: "#ea580c".to_string(),
            tier_severe: "#c4302b".to_string(),
            awaiting: "#92400e".to_string(),
        }
    }
}

impl ThemePalette {
    pub fn tier_color(&self, tier: SeverityTier) -> &str {
        match tier {
            SeverityTier::Normal => &self.tier_normal,
            SeverityTier::Light => &self.tier_light,
            SeverityTier::Medium => &self.tier_medium,
            SeverityTier::Severe => &self.tier_severe,
        }
    }

    /// Colour of the overstay cell: awaiting entries get their own colour.
    pub fn overstay_color(&self, status: OverstayStatus, tier: SeverityTier) -> &str {
        match status {
            OverstayStatus::AwaitingStart => &self.awaiting,
            _ => self.tier_color(tier),
        }
    }

    pub fn report_status_color(&self, status: ReportStatus) -> &str {
        match status {
            ReportStatus::Ok => &self.tier_normal,
            ReportStatus::Exceeded => &self.tier_severe,
            ReportStatus::Scheduled => &self.awaiting,
        }
    }

    /// Global stylesheet injected at the root of the app.
    pub fn stylesheet(&self) -> String {
        format!(
            "body {{ margin: 0; font-family: 'Segoe UI', Helvetica, sans-serif; background: {bg}; color: {fg}; }}
.layout {{ display: flex; min-height: 100vh; }}
.sidebar {{ width: 300px; padding: 16px; background: {primary}; color: #fff; display: flex; flex-direction: column; gap: 12px; }}
.sidebar input {{ width: 100%; padding: 6px; box-sizing: border-box; }}
.sidebar .result {{ cursor: pointer; padding: 4px 6px; border-radius: 4px; }}
.sidebar .result:hover {{ background: rgba(255,255,255,0.12); }}
.main {{ flex: 1; padding: 20px; overflow: auto; }}
.card {{ background: {surface}; border: 1px solid {border}; border-radius: 8px; padding: 16px; margin-bottom: 16px; }}
.grid {{ display: grid; grid-template-columns: repeat(3, 1fr); gap: 10px; }}
.grid label {{ display: flex; flex-direction: column; font-size: 12px; color: {muted}; gap: 4px; }}
button {{ padding: 6px 12px; border-radius: 4px; border: 1px solid {border}; cursor: pointer; }}
button.primary {{ background: {accent}; color: #fff; border-color: {accent}; }}
button.danger {{ background: {danger}; color: #fff; border-color: {danger}; }}
table {{ width: 100%; border-collapse: collapse; font-size: 13px; }}
th, td {{ border-bottom: 1px solid {border}; padding: 6px; text-align: left; }}
.notice {{ padding: 10px 14px; border-radius: 6px; margin-bottom: 12px; }}
.notice.error {{ background: #ffebee; color: {danger}; }}
.notice.info {{ background: #ecfdf5; color: {ok}; }}
.modal {{ position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; }}
.modal .card {{ min-width: 380px; }}",
            bg = self.background,
            fg = self.foreground,
            primary = self.primary,
            surface = self.surface,
            border = self.border,
            muted = self.muted,
            accent = self.accent,
            danger = self.danger,
            ok = self.tier_normal,
        )
    }
}
