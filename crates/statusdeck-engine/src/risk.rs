//! Open-risk badge classification
//!
//! Precedence is fixed: High > Medium > any other severity > no open risks.

use statusdeck_core::{BadgeColor, RiskItem, Severity};

/// Reduce the severities of the open risks to a badge color
pub fn classify<I>(open_severities: I, open_count: usize) -> BadgeColor
where
    I: IntoIterator<Item = Severity>,
{
    let mut has_medium = false;
    for severity in open_severities {
        match severity {
            Severity::High => return BadgeColor::Danger,
            Severity::Medium => has_medium = true,
            Severity::Low | Severity::Unrecognized => {}
        }
    }
    if has_medium || open_count > 0 {
        BadgeColor::Warning
    } else {
        BadgeColor::Secondary
    }
}

/// Badge color for a risk register, considering open risks only
pub fn risk_color(risks: &[RiskItem]) -> BadgeColor {
    let open: Vec<Severity> = risks
        .iter()
        .filter(|r| r.is_open())
        .map(|r| r.severity)
        .collect();
    classify(open.iter().copied(), open.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use Severity::*;

    #[test]
    fn high_wins_over_everything() {
        assert_eq!(classify([Low, Medium, High, Unrecognized], 4), BadgeColor::Danger);
        assert_eq!(classify([High], 1), BadgeColor::Danger);
    }

    #[test]
    fn medium_without_high_is_warning() {
        assert_eq!(classify([Medium, Low], 2), BadgeColor::Warning);
    }

    #[test]
    fn other_severities_are_warning() {
        assert_eq!(classify([Low], 1), BadgeColor::Warning);
        assert_eq!(classify([Unrecognized, Unrecognized], 2), BadgeColor::Warning);
    }

    #[test]
    fn no_open_risks_is_secondary() {
        assert_eq!(classify(Vec::<Severity>::new(), 0), BadgeColor::Secondary);
    }

    #[test]
    fn closed_risks_are_ignored() {
        let risks = vec![
            RiskItem::new("Closed", High),
            RiskItem::new("Mitigated", Medium),
            RiskItem::new(" open ", Low),
        ];
        assert_eq!(risk_color(&risks), BadgeColor::Warning);

        let risks = vec![RiskItem::new("Closed", High)];
        assert_eq!(risk_color(&risks), BadgeColor::Secondary);
    }

    #[test]
    fn open_high_risk_is_danger() {
        let risks = vec![RiskItem::new("Open", Low), RiskItem::new("OPEN", High)];
        assert_eq!(risk_color(&risks), BadgeColor::Danger);
    }
}
