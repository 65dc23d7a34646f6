//! Ordered lists of compression methods and the preview pipeline.
//!
//! Methods run in list order against one shared [`MarkingData`], so every
//! method sees the deletions and segment breaks of the methods before it. The
//! whole list persists as its members' settings strings joined with `;`.

use log::{info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::methods::{CompressionMethod, CompressionMethodType};
use crate::{MarkingData, Track, TrackDetails};

/// Outcome of previewing a [`MethodList`] against a track.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompressionReport {
    /// Final markings after every active method has run
    pub markings: MarkingData,
    /// Points newly deleted by each active method, in run order
    pub per_method: Vec<(CompressionMethodType, usize)>,
    pub total_deleted: usize,
}

impl CompressionReport {
    /// Indices of every point marked for deletion.
    pub fn deleted_indices(&self) -> Vec<usize> {
        self.markings.deleted_indices()
    }
}

/// An ordered list of compression methods.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MethodList {
    methods: Vec<CompressionMethod>,
}

impl From<Vec<CompressionMethod>> for MethodList {
    fn from(methods: Vec<CompressionMethod>) -> Self {
        Self { methods }
    }
}

impl MethodList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, method: CompressionMethod) {
        self.methods.push(method);
    }

    pub fn methods(&self) -> &[CompressionMethod] {
        &self.methods
    }

    pub fn methods_mut(&mut self) -> &mut [CompressionMethod] {
        &mut self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Restore a list from `;`-separated settings strings.
    ///
    /// Fragments which don't parse are dropped with a warning.
    ///
    /// # Example
    /// ```
    /// use track_compress::MethodList;
    ///
    /// let list = MethodList::from_settings_string("xDUP:;oDPC:1500;garbage;xTSA:20");
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(list.to_settings_string(), "xDUP:;oDPC:1500;xTSA:20");
    /// ```
    pub fn from_settings_string(settings: &str) -> Self {
        let methods = settings
            .split(';')
            .filter(|fragment| !fragment.is_empty())
            .filter_map(|fragment| match fragment.parse::<CompressionMethod>() {
                Ok(method) => Some(method),
                Err(e) => {
                    warn!("[Compress] Dropping settings fragment: {}", e);
                    None
                }
            })
            .collect();
        Self { methods }
    }

    pub fn to_settings_string(&self) -> String {
        self.methods
            .iter()
            .map(CompressionMethod::to_settings_string)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Run every active method in order and report what would be deleted.
    ///
    /// The track itself is left untouched.
    pub fn preview(&self, track: &Track) -> CompressionReport {
        let details = TrackDetails::new(track);
        let mut markings = MarkingData::new(track.num_points());
        let mut per_method = Vec::new();

        for method in self.methods.iter().filter(|m| m.is_active()) {
            let deleted = method.preview(track, &details, &mut markings);
            per_method.push((method.method_type(), deleted));
        }

        let total_deleted = markings.num_deleted();
        info!(
            "[Compress] {} active methods marked {} of {} points for deletion",
            per_method.len(),
            total_deleted,
            track.num_points()
        );
        CompressionReport {
            markings,
            per_method,
            total_deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{speed_track, straight_track};

    fn active(mut method: CompressionMethod) -> CompressionMethod {
        method.set_active(true);
        method
    }

    #[test]
    fn test_settings_round_trip() {
        let list = MethodList::from(vec![
            active(CompressionMethod::duplicates()),
            CompressionMethod::douglas_peucker(2000),
            active(CompressionMethod::nearby_with_distance(12.5)),
            CompressionMethod::ski_lifts(),
        ]);
        let settings = list.to_settings_string();
        assert_eq!(settings, "xDUP:;oDPC:2000;xNED:12.5;oSKI:");
        assert_eq!(MethodList::from_settings_string(&settings), list);
    }

    #[test]
    fn test_bad_fragments_dropped() {
        let list = MethodList::from_settings_string(";;DUP;xNEF:50;;oXYZ:1;");
        assert_eq!(list.len(), 1);
        assert_eq!(list.methods()[0], active(CompressionMethod::nearby_with_factor(50)));
        assert!(MethodList::from_settings_string("").is_empty());
    }

    #[test]
    fn test_preview_runs_active_methods_in_order() {
        let list = MethodList::from(vec![
            active(CompressionMethod::too_fast(32.5)),
            CompressionMethod::douglas_peucker(1),
            active(CompressionMethod::too_soon(45)),
        ]);
        let track = speed_track(33);
        let report = list.preview(&track);

        assert_eq!(
            report.per_method,
            vec![
                (CompressionMethodType::TooFast, 3),
                (CompressionMethodType::TimeDifference, 22),
            ]
        );
        assert_eq!(report.total_deleted, 25);
        let kept: Vec<usize> = (0..33).filter(|&i| !report.markings.is_deleted(i)).collect();
        assert_eq!(kept, vec![0, 5, 10, 15, 19, 23, 28, 32]);
        assert_eq!(report.deleted_indices().len(), 25);
    }

    #[test]
    fn test_preview_nothing_active() {
        let list = MethodList::from(vec![CompressionMethod::nearby_with_distance(1_000_000.0)]);
        let report = list.preview(&straight_track(10));
        assert!(report.per_method.is_empty());
        assert_eq!(report.total_deleted, 0);
        assert_eq!(report.markings.num_points(), 10);
    }

    #[test]
    fn test_preview_empty_track() {
        let list = MethodList::from_settings_string("xDUP:;xNEF:200;xWAC:2;xSIN:2;xDPC:2000;xNED:10;xSLO:2;xFAS:40;xTSA:20;xSKI:");
        assert_eq!(list.len(), 10);
        let report = list.preview(&Track::new());
        assert_eq!(report.per_method.len(), 10);
        assert_eq!(report.total_deleted, 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_report() {
        let list = MethodList::from(vec![active(CompressionMethod::too_fast(32.5))]);
        let report = list.preview(&speed_track(33));
        let json = serde_json::to_string(&report).unwrap();
        let back: CompressionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);

        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"{"methods":["xFAS:32.5"]}"#);
    }
}
