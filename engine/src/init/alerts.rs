use crate::rng::SimRng;
use crate::types::{AlertItem, AlertKind, AlertStatus, RECOMMENDED_ACTIONS, ZoneName};

/// Alerts present at session start.
pub const INITIAL_ALERTS: usize = 12;

/// Most alerts retained at any time.
pub const MAX_ALERTS: usize = 20;

/// Initial alerts are spread over the last two hours.
const LOOKBACK_MS: f64 = 2.0 * 3_600_000.0;

/// Actions offered on alerts raised while the simulation runs. The last
/// entry of [`RECOMMENDED_ACTIONS`] only appears in the initial backlog.
pub const LIVE_ACTIONS: [&str; 4] = [
    RECOMMENDED_ACTIONS[0],
    RECOMMENDED_ACTIONS[1],
    RECOMMENDED_ACTIONS[2],
    RECOMMENDED_ACTIONS[3],
];

/// Draws a live alert raised at `ts_ms`: kind, zone, dwell duration, action.
pub fn draw_alert(rng: &mut SimRng, id: String, ts_ms: u64) -> AlertItem {
    let kind = *rng.pick(&AlertKind::ALL);
    let zone = *rng.pick(&ZoneName::ALL);
    let dwell_duration_sec = 60.0 + rng.next() * 120.0;
    let recommended_action = rng.pick(&LIVE_ACTIONS).to_string();

    AlertItem {
        id,
        kind,
        ts_ms,
        zone,
        dwell_duration_sec,
        recommended_action,
        status: AlertStatus::New,
        zone_id: zone.zone_id(),
    }
}

/// Newest first. Stable, so equal timestamps keep their relative order.
pub fn sort_newest_first(alerts: &mut [AlertItem]) {
    alerts.sort_by(|a, b| b.ts_ms.cmp(&a.ts_ms));
}

/// Initial alert backlog with random timestamps, statuses and content.
///
/// Per alert the draws are kind, zone, age, dwell duration, action, status.
pub fn build_alerts(rng: &mut SimRng, now_ms: u64) -> Vec<AlertItem> {
    let mut alerts: Vec<AlertItem> = (0..INITIAL_ALERTS)
        .map(|i| {
            let kind = *rng.pick(&AlertKind::ALL);
            let zone = *rng.pick(&ZoneName::ALL);
            let ts_ms = now_ms.saturating_sub((rng.next() * LOOKBACK_MS) as u64);
            let dwell_duration_sec = 60.0 + rng.next() * 120.0;
            let recommended_action = rng.pick(&RECOMMENDED_ACTIONS).to_string();
            let status = *rng.pick(&AlertStatus::ALL);

            AlertItem {
                id: format!("alert-{i}"),
                kind,
                ts_ms,
                zone,
                dwell_duration_sec,
                recommended_action,
                status,
                zone_id: zone.zone_id(),
            }
        })
        .collect();

    sort_newest_first(&mut alerts);
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000_000;

    #[test]
    fn backlog_is_sorted_and_recent() {
        let alerts = build_alerts(&mut SimRng::default(), NOW);

        assert_eq!(alerts.len(), INITIAL_ALERTS);
        for pair in alerts.windows(2) {
            assert!(pair[0].ts_ms >= pair[1].ts_ms);
        }
        for a in &alerts {
            assert!(a.ts_ms <= NOW && a.ts_ms >= NOW - LOOKBACK_MS as u64);
            assert!((60.0..180.0).contains(&a.dwell_duration_sec));
            assert_eq!(a.zone_id, a.zone.zone_id());
        }
    }

    #[test]
    fn backlog_draws_kind_zone_age_dwell_action_status() {
        let mut expected = SimRng::new(12345);
        let kind = *expected.pick(&AlertKind::ALL);
        let zone = *expected.pick(&ZoneName::ALL);
        let ts_ms = NOW.saturating_sub((expected.next() * LOOKBACK_MS) as u64);
        let dwell = 60.0 + expected.next() * 120.0;
        let action = expected.pick(&RECOMMENDED_ACTIONS).to_string();
        let status = *expected.pick(&AlertStatus::ALL);

        let alerts = build_alerts(&mut SimRng::new(12345), NOW);
        let first = alerts.iter().find(|a| a.id == "alert-0").unwrap();

        assert_eq!(first.kind, kind);
        assert_eq!(first.zone, zone);
        assert_eq!(first.ts_ms, ts_ms);
        assert_eq!(first.dwell_duration_sec, dwell);
        assert_eq!(first.recommended_action, action);
        assert_eq!(first.status, status);
    }

    #[test]
    fn live_alerts_never_suggest_redirect() {
        let mut rng = SimRng::new(3);
        for n in 0..500 {
            let alert = draw_alert(&mut rng, format!("alert-t{n}"), NOW);
            assert_eq!(alert.status, AlertStatus::New);
            assert!(LIVE_ACTIONS.contains(&alert.recommended_action.as_str()));
        }
        assert_eq!(LIVE_ACTIONS.len(), 4);
        assert!(!LIVE_ACTIONS.contains(&"Redirect to alternate zone"));
    }

    #[test]
    fn ids_are_unique() {
        let alerts = build_alerts(&mut SimRng::new(5), NOW);
        let mut ids: Vec<&str> = alerts.iter().map(|a| a.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), INITIAL_ALERTS);
    }
}
