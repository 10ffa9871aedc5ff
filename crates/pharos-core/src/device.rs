use std::fmt;

/// Device emulation profile for a Lighthouse run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceProfile {
    Desktop,
    Mobile,
    Tablet,
}

impl DeviceProfile {
    /// Audit order within a URL: desktop, then mobile, then tablet
    pub const ALL: [DeviceProfile; 3] = [
        DeviceProfile::Desktop,
        DeviceProfile::Mobile,
        DeviceProfile::Tablet,
    ];

    /// Lowercase name used for artifact directories
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceProfile::Desktop => "desktop",
            DeviceProfile::Mobile => "mobile",
            DeviceProfile::Tablet => "tablet",
        }
    }

    /// Column-group label in the report header
    pub fn label(&self) -> &'static str {
        match self {
            DeviceProfile::Desktop => "Desktop",
            DeviceProfile::Mobile => "Mobile",
            DeviceProfile::Tablet => "Tablet",
        }
    }

    /// Lighthouse emulation flags. Tablet has no preset upstream, so it is
    /// mobile emulation with an explicit 768x1024 viewport at 2x scale.
    pub fn lighthouse_flags(&self) -> &'static [&'static str] {
        match self {
            DeviceProfile::Desktop => &["--preset=desktop"],
            DeviceProfile::Mobile => &["--emulated-form-factor=mobile"],
            DeviceProfile::Tablet => &[
                "--emulated-form-factor=mobile",
                "--screenEmulation.width=768",
                "--screenEmulation.height=1024",
                "--screenEmulation.deviceScaleFactor=2",
            ],
        }
    }

    /// First report column (0-indexed) of this profile's four-score group.
    /// Column 0 is the URL; desktop occupies 1-4, mobile 5-8, tablet 9-12.
    pub fn score_column(&self) -> u16 {
        match self {
            DeviceProfile::Desktop => 1,
            DeviceProfile::Mobile => 5,
            DeviceProfile::Tablet => 9,
        }
    }

    /// Slot in a report row's per-device score array
    pub fn index(&self) -> usize {
        match self {
            DeviceProfile::Desktop => 0,
            DeviceProfile::Mobile => 1,
            DeviceProfile::Tablet => 2,
        }
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_order_is_desktop_mobile_tablet() {
        assert_eq!(
            DeviceProfile::ALL,
            [
                DeviceProfile::Desktop,
                DeviceProfile::Mobile,
                DeviceProfile::Tablet
            ]
        );
    }

    #[test]
    fn desktop_uses_preset_flag() {
        assert_eq!(
            DeviceProfile::Desktop.lighthouse_flags(),
            &["--preset=desktop"]
        );
    }

    #[test]
    fn tablet_adds_viewport_to_mobile_emulation() {
        let flags = DeviceProfile::Tablet.lighthouse_flags();
        assert!(flags.contains(&"--emulated-form-factor=mobile"));
        assert!(flags.contains(&"--screenEmulation.width=768"));
        assert!(flags.contains(&"--screenEmulation.height=1024"));
        assert!(flags.contains(&"--screenEmulation.deviceScaleFactor=2"));
    }

    #[test]
    fn column_groups_do_not_overlap() {
        // Each group spans four columns; the next group starts right after
        assert_eq!(DeviceProfile::Desktop.score_column(), 1);
        assert_eq!(DeviceProfile::Mobile.score_column(), 5);
        assert_eq!(DeviceProfile::Tablet.score_column(), 9);
    }
}
