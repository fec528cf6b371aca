use crate::errors::{AirmanError, Result};
use crate::model::WirelessNetwork;

/// All networks whose SSID exactly equals `ssid`, in their original
/// relative order. SSIDs are compared byte for byte; they are arbitrary
/// byte strings, not case-folded text. Empty result is `NotFound`.
pub fn group_by_ssid(ssid: &str, networks: &[WirelessNetwork]) -> Result<Vec<WirelessNetwork>> {
    let group: Vec<WirelessNetwork> = networks
        .iter()
        .filter(|network| network.ssid.as_bytes() == ssid.as_bytes())
        .cloned()
        .collect();
    if group.is_empty() {
        return Err(AirmanError::NotFound(format!(
            "no network in scan results with SSID {:?}",
            ssid
        )));
    }
    Ok(group)
}

/// The candidate with the strongest signal.
///
/// Signal quality is negative-is-better dBm: the numerically largest rssi
/// (closest to zero) wins. Ties resolve to the first maximal element in
/// input order. An empty input is a precondition violation and fails with
/// `InvalidArgument` rather than proposing a connection to nothing.
pub fn select_best(candidates: &[WirelessNetwork]) -> Result<&WirelessNetwork> {
    let mut candidates = candidates.iter();
    let first = candidates.next().ok_or_else(|| {
        AirmanError::InvalidArgument("cannot select the best of zero candidates".to_string())
    })?;
    Ok(candidates.fold(first, |best, candidate| {
        if candidate.rssi > best.rssi {
            candidate
        } else {
            best
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(ssid: &str, bssid: &str, rssi: i32) -> WirelessNetwork {
        WirelessNetwork::new(ssid, bssid, rssi, 6)
    }

    #[test]
    fn grouping_keeps_relative_order() {
        let networks = vec![
            network("A", "aa:aa:aa:aa:aa:01", -70),
            network("B", "aa:aa:aa:aa:aa:02", -50),
            network("A", "aa:aa:aa:aa:aa:03", -40),
        ];
        let group = group_by_ssid("A", &networks).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group[0].bssid, "aa:aa:aa:aa:aa:01");
        assert_eq!(group[1].bssid, "aa:aa:aa:aa:aa:03");
    }

    #[test]
    fn grouping_is_byte_exact() {
        let networks = vec![network("café", "aa:aa:aa:aa:aa:01", -70)];
        assert!(group_by_ssid("café", &networks).is_ok());
        let err = group_by_ssid("CAFÉ", &networks).unwrap_err();
        assert!(matches!(err, AirmanError::NotFound(_)), "{err}");
    }

    #[test]
    fn best_is_the_numerically_largest_rssi() {
        let networks = vec![
            network("A", "aa:aa:aa:aa:aa:01", -70),
            network("A", "aa:aa:aa:aa:aa:02", -40),
            network("A", "aa:aa:aa:aa:aa:03", -55),
        ];
        let best = select_best(&networks).unwrap();
        assert_eq!(best.rssi, -40);
        assert_eq!(best.bssid, "aa:aa:aa:aa:aa:02");
    }

    #[test]
    fn ties_go_to_the_first_in_input_order() {
        let networks = vec![
            network("A", "aa:aa:aa:aa:aa:01", -40),
            network("A", "aa:aa:aa:aa:aa:02", -40),
        ];
        assert_eq!(select_best(&networks).unwrap().bssid, "aa:aa:aa:aa:aa:01");
    }

    #[test]
    fn single_candidate_comes_back_unchanged() {
        let networks = vec![network("A", "aa:aa:aa:aa:aa:01", -93)];
        assert_eq!(select_best(&networks).unwrap(), &networks[0]);
    }

    #[test]
    fn empty_input_is_an_invalid_argument() {
        let err = select_best(&[]).unwrap_err();
        assert!(matches!(err, AirmanError::InvalidArgument(_)), "{err}");
    }
}
