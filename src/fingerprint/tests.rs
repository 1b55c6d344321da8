//! Additional unit tests for fingerprint module

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn platform_from_str() {
        assert_eq!("iOS".parse::<ClientPlatform>().unwrap(), ClientPlatform::Ios);
        assert_eq!("iphone".parse::<ClientPlatform>().unwrap(), ClientPlatform::Ios);
        assert_eq!("desktop".parse::<ClientPlatform>().unwrap(), ClientPlatform::Desktop);
        assert_eq!(" Android ".parse::<ClientPlatform>().unwrap(), ClientPlatform::Android);
        assert!("tvos".parse::<ClientPlatform>().is_err());
    }

    #[test]
    fn platform_display_round_trips() {
        for p in [ClientPlatform::Desktop, ClientPlatform::Ios, ClientPlatform::Android] {
            assert_eq!(p.to_string().parse::<ClientPlatform>().unwrap(), p);
        }
    }

    #[test]
    fn iphone_profile_headers() {
        let profile = DeviceProfile::iphone_safari();

        let headers = profile.header_pairs();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].0, "User-Agent");
        assert!(headers[0].1.contains("iPhone OS 18_0"));
        assert_eq!(headers[1], ("Viewport-Width".to_string(), "375".to_string()));
    }

    #[test]
    fn profile_without_viewport() {
        let profile = DeviceProfile {
            user_agent: "sourcer/0.1".to_string(),
            viewport_width: None,
        };
        assert_eq!(profile.header_pairs().len(), 1);
    }
}
