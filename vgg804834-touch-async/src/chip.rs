//! Chip identification data and the tables it is matched from.

/// Per-chip constants resolved once at discovery time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipProfile {
    /// Number of simultaneous contacts the controller reports.
    pub max_ts_points: u8,
}

/// The generic RZ/G2L touch controller on the VGG804834 panel.
pub const RZG2L_TS: ChipProfile = ChipProfile { max_ts_points: 5 };

/// Device-tree compatible strings and their profiles.
pub const OF_MATCH_TABLE: &[(&str, ChipProfile)] = &[("rzg2l,touchscreen", RZG2L_TS)];

/// Legacy I2C device id names and their profiles.
pub const ID_TABLE: &[(&str, ChipProfile)] = &[("rzg2l generic ts", RZG2L_TS)];

impl ChipProfile {
    /// Looks up the profile for a discovered device.
    ///
    /// The device-tree compatible is tried first. If it is absent or unknown,
    /// the legacy id name is tried.
    pub fn resolve(of_compatible: Option<&str>, id_name: Option<&str>) -> Option<ChipProfile> {
        lookup(OF_MATCH_TABLE, of_compatible).or_else(|| lookup(ID_TABLE, id_name))
    }
}

fn lookup(table: &[(&str, ChipProfile)], key: Option<&str>) -> Option<ChipProfile> {
    let key = key?;
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, profile)| *profile)
}
