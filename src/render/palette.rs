//! Label-to-color assignment.

use crate::constants::LABEL_PALETTE;
use crate::rttm::Segment;

/// Deterministic label-to-color mapping.
///
/// Colors are assigned in first-seen order over the segment sequence, so
/// identical inputs always produce identical colors. Labels beyond the
/// palette size wrap around.
#[derive(Debug, Clone)]
pub struct LabelPalette {
    entries: Vec<(String, [u8; 3])>,
}

impl LabelPalette {
    /// Build a palette from the distinct labels in `segments`, in
    /// first-seen order.
    #[must_use]
    pub fn from_segments(segments: &[Segment]) -> Self {
        let mut entries: Vec<(String, [u8; 3])> = Vec::new();

        for segment in segments {
            if entries.iter().any(|(label, _)| label == &segment.label) {
                continue;
            }
            let color = LABEL_PALETTE[entries.len() % LABEL_PALETTE.len()];
            entries.push((segment.label.clone(), color));
        }

        Self { entries }
    }

    /// Color assigned to `label`, if the label was present.
    #[must_use]
    pub fn color(&self, label: &str) -> Option<[u8; 3]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
    }

    /// Label/color pairs in assignment order.
    #[must_use]
    pub fn entries(&self) -> &[(String, [u8; 3])] {
        &self.entries
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no labels were seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_precision_loss)]
mod tests {
    use super::*;

    fn seg(start: f64, label: &str) -> Segment {
        Segment {
            start,
            duration: 1.0,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_first_seen_order() {
        let segments = vec![seg(0.0, "B"), seg(1.0, "A"), seg(2.0, "B"), seg(3.0, "C")];
        let palette = LabelPalette::from_segments(&segments);

        assert_eq!(palette.len(), 3);
        assert_eq!(palette.entries()[0].0, "B");
        assert_eq!(palette.entries()[1].0, "A");
        assert_eq!(palette.entries()[2].0, "C");
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let segments = vec![seg(0.0, "x"), seg(1.0, "y"), seg(2.0, "z")];
        let a = LabelPalette::from_segments(&segments);
        let b = LabelPalette::from_segments(&segments);

        for (label, color) in a.entries() {
            assert_eq!(b.color(label), Some(*color));
        }
    }

    #[test]
    fn test_distinct_labels_get_distinct_colors() {
        let segments: Vec<Segment> = (0..LABEL_PALETTE.len())
            .map(|i| seg(i as f64, &format!("spk{i}")))
            .collect();
        let palette = LabelPalette::from_segments(&segments);

        let mut colors: Vec<[u8; 3]> =
            palette.entries().iter().map(|(_, c)| *c).collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), LABEL_PALETTE.len());
    }

    #[test]
    fn test_palette_wraps_past_capacity() {
        let segments: Vec<Segment> = (0..LABEL_PALETTE.len() + 1)
            .map(|i| seg(i as f64, &format!("spk{i}")))
            .collect();
        let palette = LabelPalette::from_segments(&segments);

        assert_eq!(palette.len(), LABEL_PALETTE.len() + 1);
        assert_eq!(
            palette.color(&format!("spk{}", LABEL_PALETTE.len())),
            Some(LABEL_PALETTE[0])
        );
    }

    #[test]
    fn test_unknown_label() {
        let palette = LabelPalette::from_segments(&[seg(0.0, "A")]);
        assert_eq!(palette.color("missing"), None);
    }
}
