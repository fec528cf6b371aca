use airman::errors::AirmanError;
use airman::model::WirelessNetwork;
use airman::scan::parse_scan;
use airman::select::{group_by_ssid, select_best};

fn candidates() -> Vec<WirelessNetwork> {
    vec![
        WirelessNetwork::new("A", "aa:aa:aa:aa:aa:01", -70, 1),
        WirelessNetwork::new("A", "aa:aa:aa:aa:aa:02", -40, 6),
        WirelessNetwork::new("A", "aa:aa:aa:aa:aa:03", -55, 11),
    ]
}

#[test]
fn test_select_best_returns_strongest_signal() {
    let networks = candidates();
    let best = select_best(&networks).unwrap();
    assert_eq!(best.rssi, -40);
    assert_eq!(best.bssid, "aa:aa:aa:aa:aa:02");
}

#[test]
fn test_select_best_single_element_is_returned_unchanged() {
    let networks = vec![WirelessNetwork::new("A", "aa:aa:aa:aa:aa:01", -91, 1)];
    assert_eq!(select_best(&networks).unwrap(), &networks[0]);
}

#[test]
fn test_select_best_empty_input_is_invalid_argument() {
    let err = select_best(&[]).unwrap_err();
    assert!(matches!(err, AirmanError::InvalidArgument(_)), "{err}");
}

#[test]
fn test_group_by_ssid_zero_matches_is_not_found() {
    let err = group_by_ssid("X", &candidates()).unwrap_err();
    assert!(matches!(err, AirmanError::NotFound(_)), "{err}");
}

#[test]
fn test_group_by_ssid_keeps_original_relative_order() {
    let mut networks = candidates();
    networks.insert(1, WirelessNetwork::new("B", "bb:bb:bb:bb:bb:01", -30, 6));
    let group = group_by_ssid("A", &networks).unwrap();
    assert_eq!(group.len(), 3);
    let bssids: Vec<&str> = group.iter().map(|n| n.bssid.as_str()).collect();
    assert_eq!(
        bssids,
        vec!["aa:aa:aa:aa:aa:01", "aa:aa:aa:aa:aa:02", "aa:aa:aa:aa:aa:03"]
    );
}

// End to end: a scan listing with several access points for one SSID
// grouped and ranked the way the application layer does it.
#[test]
fn test_scan_then_group_then_select() {
    let listing = b"\
                            SSID BSSID             RSSI CHANNEL HT CC SECURITY (auth/unicast/group)\n\
                         HomeBase e0:46:9a:3c:71:22  -74  11      Y  US WPA2(PSK/AES/AES)\n\
                         HomeBase e0:46:9a:3c:71:23  -48  149     Y  US WPA2(PSK/AES/AES)\n\
                            Guest e0:46:9a:3c:71:24  -50  11      Y  US NONE\n";
    let networks = parse_scan(listing).unwrap();
    let group = group_by_ssid("HomeBase", &networks).unwrap();
    assert_eq!(group.len(), 2);
    let best = select_best(&group).unwrap();
    assert_eq!(best.bssid, "e0:46:9a:3c:71:23");
    assert_eq!(best.channel, 149);
}
