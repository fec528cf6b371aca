use std::collections::HashSet;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::errors::{AirmanError, Result};
use crate::model::WirelessNetwork;
use crate::security::{AuthMethod, Cipher, Protocol, SecurityDescriptor};

lazy_static! {
    /// One scan record per physical line:
    ///
    /// `SSID BSSID RSSI CHANNEL HT CC [SECURITY ...]`
    ///
    /// The SSID may contain internal spaces, so fields are anchored on the
    /// BSSID's colon-separated hex pairs and the sign-prefixed RSSI rather
    /// than split on whitespace. The numeric fields deliberately admit an
    /// empty digit run; a sign with no digits is a record that matched the
    /// shape but cannot convert, which must fail the batch.
    static ref SCAN_LINE_RE: Regex = Regex::new(
        r"(?x)
        ^\s*
        (?P<ssid>[A-Za-z0-9_\-\s]*?)
        \s*
        (?P<bssid>(?:[0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2})
        \s+
        (?P<rssi>[-+][0-9]*)
        \s+
        (?P<channel>[0-9]*)(?:,[-+]?[0-9]+)?
        \s+
        (?P<ht>[YN])
        \s+
        (?P<cc>[A-Z-]*)
        \s*
        (?P<security>NONE|[A-Za-z0-9.]+\([^)]*\)(?:\s+[A-Za-z0-9.]+\([^)]*\))?)?
        \s*$
        "
    )
    .unwrap();

    /// One `PROTO(METHOD/CIPHER[,CIPHER]/GROUPCIPHER)` clause.
    static ref SECURITY_GROUP_RE: Regex = Regex::new(
        r"(?x)
        (?P<proto>[A-Za-z0-9.]+)
        \(
        (?P<method>[^/,)]+)
        /
        (?P<unicast1>[^/,)]+)
        (?:,(?P<unicast2>[^/,)]+))?
        /
        (?P<group>[^/)]+)
        \)
        "
    )
    .unwrap();
}

/// Parse the raw output of the scan command into networks, in input order.
///
/// Lines that do not match the record shape (headers, blanks) are skipped.
/// A line that matches but whose signal quality or channel fails integer
/// conversion fails the whole batch, and so does a BSSID occurring twice:
/// both mean the extraction pattern cannot be trusted for this output.
pub fn parse_scan(output: &[u8]) -> Result<Vec<WirelessNetwork>> {
    let text = String::from_utf8_lossy(output);
    let mut networks = Vec::new();
    let mut seen_bssids = HashSet::new();

    for line in text.lines() {
        let network = match parse_line(line)? {
            Some(network) => network,
            None => {
                trace!("skipping non-record scan line: {:?}", line);
                continue;
            }
        };
        if !seen_bssids.insert(network.bssid.clone()) {
            return Err(AirmanError::MalformedInput(format!(
                "BSSID {} reported twice in one scan batch",
                network.bssid
            )));
        }
        networks.push(network);
    }

    Ok(networks)
}

fn parse_line(line: &str) -> Result<Option<WirelessNetwork>> {
    let caps = match SCAN_LINE_RE.captures(line) {
        Some(caps) => caps,
        None => return Ok(None),
    };

    let rssi_raw = &caps["rssi"];
    let rssi: i32 = rssi_raw.parse().map_err(|_| {
        AirmanError::PartialRecord(format!(
            "signal quality {:?} is not an integer in line {:?}",
            rssi_raw, line
        ))
    })?;

    let channel_raw = &caps["channel"];
    let channel: u32 = channel_raw.parse().map_err(|_| {
        AirmanError::PartialRecord(format!(
            "channel {:?} is not an integer in line {:?}",
            channel_raw, line
        ))
    })?;

    let country = caps["cc"].trim();

    let mut network = WirelessNetwork::new(
        caps["ssid"].trim().to_string(),
        caps["bssid"].trim().to_string(),
        rssi,
        channel,
    );
    network.ht = &caps["ht"] == "Y";
    // The listing prints `--` when no country code is known.
    network.country_code = if country.is_empty() || country == "--" {
        None
    } else {
        Some(country.to_string())
    };
    network.security = parse_security_clause(caps.name("security").map(|m| m.as_str()));

    Ok(Some(network))
}

/// An absent clause and the literal `NONE` both mean an open network,
/// which carries exactly one bare descriptor. Otherwise each repeating
/// group becomes one descriptor, left to right.
fn parse_security_clause(clause: Option<&str>) -> Vec<SecurityDescriptor> {
    let clause = match clause {
        Some(clause) if clause != "NONE" => clause,
        _ => return vec![SecurityDescriptor::open()],
    };

    SECURITY_GROUP_RE
        .captures_iter(clause)
        .map(|group| {
            let mut unicast = vec![Cipher::from_token(&group["unicast1"])];
            if let Some(second) = group.name("unicast2") {
                unicast.push(Cipher::from_token(second.as_str()));
            }
            SecurityDescriptor {
                protocol: Protocol::from_token(&group["proto"]),
                method: AuthMethod::from_token(&group["method"]),
                unicast,
                group: Some(Cipher::from_token(&group["group"])),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_and_blank_lines_are_skipped() {
        let output = b"\
                            SSID BSSID             RSSI CHANNEL HT CC SECURITY (auth/unicast/group)\n\
\n\
                      HomeBase e0:46:9a:3c:71:22  -74  11      Y  US WPA2(PSK/AES/AES)\n";
        let networks = parse_scan(output).unwrap();
        assert_eq!(networks.len(), 1);
        assert_eq!(networks[0].ssid, "HomeBase");
        assert_eq!(networks[0].bssid, "e0:46:9a:3c:71:22");
        assert_eq!(networks[0].rssi, -74);
        assert_eq!(networks[0].channel, 11);
        assert!(networks[0].ht);
        assert_eq!(networks[0].country_code.as_deref(), Some("US"));
    }

    #[test]
    fn ssid_with_internal_spaces_is_anchored_on_the_bssid() {
        let output = b"Pretty Fly for a WiFi 00:1c:f0:9a:22:10  -61  6       N  US NONE\n";
        let networks = parse_scan(output).unwrap();
        assert_eq!(networks[0].ssid, "Pretty Fly for a WiFi");
        assert!(!networks[0].ht);
    }

    #[test]
    fn open_network_has_a_single_bare_descriptor() {
        let output = b"CoffeeShop 10:20:30:40:50:60  -80  1       Y  -- NONE\n";
        let networks = parse_scan(output).unwrap();
        assert_eq!(networks[0].security.len(), 1);
        assert_eq!(networks[0].security[0], SecurityDescriptor::open());
        assert!(networks[0].is_open());
    }

    #[test]
    fn absent_security_clause_also_means_open() {
        let output = b"Legacy 10:20:30:40:50:61  -82  3       N  US\n";
        let networks = parse_scan(output).unwrap();
        assert_eq!(networks[0].security, vec![SecurityDescriptor::open()]);
    }

    #[test]
    fn two_security_groups_preserve_input_order() {
        let output =
            b"Dualstack aa:bb:cc:dd:ee:01  -55  44,+1   Y  US WPA(PSK/TKIP/TKIP) WPA2(PSK/AES,TKIP/TKIP)\n";
        let networks = parse_scan(output).unwrap();
        let security = &networks[0].security;
        assert_eq!(security.len(), 2);
        assert_eq!(security[0].protocol, Protocol::Wpa);
        assert_eq!(security[0].unicast, vec![Cipher::Tkip]);
        assert_eq!(security[1].protocol, Protocol::Wpa2);
        assert_eq!(security[1].method, AuthMethod::Psk);
        assert_eq!(security[1].unicast, vec![Cipher::Aes, Cipher::Tkip]);
        assert_eq!(security[1].group, Some(Cipher::Tkip));
        assert_eq!(networks[0].channel, 44);
    }

    #[test]
    fn enterprise_auth_token_maps_to_eap() {
        let output = b"Corp aa:bb:cc:dd:ee:02  -60  36      Y  US WPA2(802.1x/AES/AES)\n";
        let networks = parse_scan(output).unwrap();
        assert_eq!(networks[0].security[0].method, AuthMethod::Eap);
    }

    #[test]
    fn unknown_tokens_survive_as_raw_text() {
        let output = b"Future aa:bb:cc:dd:ee:03  -58  149     Y  US WPA3(SAE/GCMP/GCMP)\n";
        let networks = parse_scan(output).unwrap();
        let descriptor = &networks[0].security[0];
        assert_eq!(descriptor.protocol, Protocol::Unknown("WPA3".to_string()));
        assert_eq!(descriptor.method, AuthMethod::Unknown("SAE".to_string()));
        assert_eq!(descriptor.unicast, vec![Cipher::Unknown("GCMP".to_string())]);
    }

    #[test]
    fn signless_rssi_digits_fail_the_batch() {
        // A bare sign matches the record shape but cannot convert.
        let output = b"Broken aa:bb:cc:dd:ee:04  -  6       Y  US NONE\n";
        let err = parse_scan(output).unwrap_err();
        assert!(matches!(err, AirmanError::PartialRecord(_)), "{err}");
    }

    #[test]
    fn overflowing_channel_fails_the_batch() {
        let output = b"Broken aa:bb:cc:dd:ee:05  -70  99999999999999999999 Y US NONE\n";
        let err = parse_scan(output).unwrap_err();
        assert!(matches!(err, AirmanError::PartialRecord(_)), "{err}");
    }

    #[test]
    fn duplicate_bssid_in_one_batch_is_rejected() {
        let output = b"\
One aa:bb:cc:dd:ee:06  -70  6       Y  US NONE\n\
Two aa:bb:cc:dd:ee:06  -40  6       Y  US NONE\n";
        let err = parse_scan(output).unwrap_err();
        assert!(matches!(err, AirmanError::MalformedInput(_)), "{err}");
    }

    #[test]
    fn records_come_back_in_input_order() {
        let output = b"\
First  aa:bb:cc:dd:ee:07  -70  6   Y  US NONE\n\
Second aa:bb:cc:dd:ee:08  -40  11  Y  US NONE\n\
Third  aa:bb:cc:dd:ee:09  -55  36  N  US NONE\n";
        let networks = parse_scan(output).unwrap();
        let ssids: Vec<&str> = networks.iter().map(|n| n.ssid.as_str()).collect();
        assert_eq!(ssids, vec!["First", "Second", "Third"]);
    }
}
