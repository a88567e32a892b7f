use crate::config::KindConfig;
use crate::domain::{BumpLevel, Change};
use crate::error::{ChangekitError, Result};

/// Analyzes pending changes to determine the automatic bump level.
///
/// Each change's kind contributes the level configured for that kind;
/// the result is the highest contribution over the severity order
/// patch < minor < major. Major is absorbing: once seen, the scan stops.
pub struct BumpAnalyzer<'a> {
    kinds: &'a [KindConfig],
}

impl<'a> BumpAnalyzer<'a> {
    /// Create a new analyzer over the configured kinds.
    pub fn new(kinds: &'a [KindConfig]) -> Self {
        BumpAnalyzer { kinds }
    }

    /// Reduce the pending changes to a single bump level.
    ///
    /// Fails with [ChangekitError::NoChangesForAuto] when there are no
    /// changes, or when no change contributes a chargeable level (every
    /// kind maps to `none` or matches nothing). A matching kind with no
    /// auto level configured at all is a configuration error
    /// ([ChangekitError::MissingAutoLevel]) surfaced immediately.
    pub fn highest_auto_level(&self, changes: &[Change]) -> Result<BumpLevel> {
        if changes.is_empty() {
            return Err(ChangekitError::NoChangesForAuto);
        }

        let mut highest: Option<BumpLevel> = None;

        for change in changes {
            for kind in self
                .kinds
                .iter()
                .filter(|k| Some(k.label.as_str()) == change.kind.as_deref())
            {
                let auto = kind.auto.ok_or(ChangekitError::MissingAutoLevel)?;

                if let Some(level) = auto.bump_level() {
                    if level == BumpLevel::Major {
                        return Ok(level);
                    }

                    if highest.map_or(true, |current| level > current) {
                        highest = Some(level);
                    }
                }
            }
        }

        highest.ok_or(ChangekitError::NoChangesForAuto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AutoLevel;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn kind(label: &str, auto: Option<AutoLevel>) -> KindConfig {
        KindConfig {
            label: label.to_string(),
            auto,
        }
    }

    fn change_of(kind_label: &str) -> Change {
        Change::new(
            None,
            None,
            Some(kind_label.to_string()),
            String::new(),
            BTreeMap::new(),
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    fn standard_kinds() -> Vec<KindConfig> {
        vec![
            kind("Added", Some(AutoLevel::Minor)),
            kind("Fixed", Some(AutoLevel::Patch)),
            kind("Removed", Some(AutoLevel::Major)),
            kind("Docs", Some(AutoLevel::None)),
        ]
    }

    #[test]
    fn test_patch_and_minor_reduce_to_minor() {
        let kinds = standard_kinds();
        let analyzer = BumpAnalyzer::new(&kinds);

        let changes = vec![change_of("Fixed"), change_of("Added")];
        assert_eq!(
            analyzer.highest_auto_level(&changes).unwrap(),
            BumpLevel::Minor
        );
    }

    #[test]
    fn test_minor_does_not_downgrade_to_patch() {
        let kinds = standard_kinds();
        let analyzer = BumpAnalyzer::new(&kinds);

        let changes = vec![change_of("Added"), change_of("Fixed")];
        assert_eq!(
            analyzer.highest_auto_level(&changes).unwrap(),
            BumpLevel::Minor
        );
    }

    #[test]
    fn test_major_short_circuits() {
        let kinds = standard_kinds();
        let analyzer = BumpAnalyzer::new(&kinds);

        let changes = vec![change_of("Fixed"), change_of("Removed"), change_of("Added")];
        assert_eq!(
            analyzer.highest_auto_level(&changes).unwrap(),
            BumpLevel::Major
        );
    }

    #[test]
    fn test_patch_only() {
        let kinds = standard_kinds();
        let analyzer = BumpAnalyzer::new(&kinds);

        let changes = vec![change_of("Fixed")];
        assert_eq!(
            analyzer.highest_auto_level(&changes).unwrap(),
            BumpLevel::Patch
        );
    }

    #[test]
    fn test_empty_changes() {
        let kinds = standard_kinds();
        let analyzer = BumpAnalyzer::new(&kinds);

        let err = analyzer.highest_auto_level(&[]).unwrap_err();
        assert!(matches!(err, ChangekitError::NoChangesForAuto));
    }

    #[test]
    fn test_none_level_contributes_nothing() {
        let kinds = standard_kinds();
        let analyzer = BumpAnalyzer::new(&kinds);

        let changes = vec![change_of("Docs")];
        let err = analyzer.highest_auto_level(&changes).unwrap_err();
        assert!(matches!(err, ChangekitError::NoChangesForAuto));
    }

    #[test]
    fn test_none_level_does_not_lower_result() {
        let kinds = standard_kinds();
        let analyzer = BumpAnalyzer::new(&kinds);

        let changes = vec![change_of("Docs"), change_of("Fixed")];
        assert_eq!(
            analyzer.highest_auto_level(&changes).unwrap(),
            BumpLevel::Patch
        );
    }

    #[test]
    fn test_missing_auto_level_is_config_error() {
        let kinds = vec![kind("Added", None)];
        let analyzer = BumpAnalyzer::new(&kinds);

        let changes = vec![change_of("Added")];
        let err = analyzer.highest_auto_level(&changes).unwrap_err();
        assert!(matches!(err, ChangekitError::MissingAutoLevel));
    }

    #[test]
    fn test_unmatched_kind_contributes_nothing() {
        let kinds = standard_kinds();
        let analyzer = BumpAnalyzer::new(&kinds);

        let changes = vec![change_of("Mystery")];
        let err = analyzer.highest_auto_level(&changes).unwrap_err();
        assert!(matches!(err, ChangekitError::NoChangesForAuto));
    }

    #[test]
    fn test_empty_kind_configuration() {
        let kinds: Vec<KindConfig> = Vec::new();
        let analyzer = BumpAnalyzer::new(&kinds);

        let changes = vec![change_of("Added")];
        let err = analyzer.highest_auto_level(&changes).unwrap_err();
        assert!(matches!(err, ChangekitError::NoChangesForAuto));
    }
}
