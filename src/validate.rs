//! Bounds validation for option values
//!
//! Values that break their option's bounds rule are clamped, never rejected.
//! Every clamp produces exactly one message on the [`DiagnosticSink`].

use crate::config::{BoundsFloor, OptionDescriptor, OptionValue, Subtype};
use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, Result};
use crate::world::WorldHeights;
use std::collections::BTreeSet;

/// Applies each option's [`Subtype`] rule to values read from a document
pub struct LayerValidator<'a> {
    heights: &'a dyn WorldHeights,
    sink: &'a dyn DiagnosticSink,
    default_ceiling: i64,
    bounds_floor: BoundsFloor,
}

impl<'a> LayerValidator<'a> {
    /// Create a validator with a default ceiling of 255 and a zero bounds floor
    pub fn new(heights: &'a dyn WorldHeights, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            heights,
            sink,
            default_ceiling: 255,
            bounds_floor: BoundsFloor::Zero,
        }
    }

    /// Height used for vertical coordinates when no world is loaded
    #[must_use]
    pub fn default_ceiling(mut self, ceiling: i64) -> Self {
        self.default_ceiling = ceiling;
        self
    }

    #[must_use]
    pub fn bounds_floor(mut self, floor: BoundsFloor) -> Self {
        self.bounds_floor = floor;
        self
    }

    pub(crate) fn sink(&self) -> &dyn DiagnosticSink {
        self.sink
    }

    /// Validate `value` for `option` in a layer that applies to `worlds`
    ///
    /// Values of options without a subtype are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedSubtype` if a subtype is attached to a
    /// non-integer value. That is a broken catalog, not bad input.
    pub fn validate(
        &self,
        option: &OptionDescriptor,
        worlds: &[String],
        value: OptionValue,
    ) -> Result<OptionValue> {
        let Some(subtype) = option.subtype else {
            return Ok(value);
        };

        let OptionValue::Int(raw) = value else {
            return Err(Error::UnsupportedSubtype {
                path: option.path.clone(),
                subtype: subtype.to_string(),
                kind: value.kind().to_string(),
            });
        };

        let validated = match subtype {
            Subtype::Percentage => self.percentage(&option.path, raw),
            Subtype::VerticalCoordinate => self.vertical(&option.path, worlds, raw),
            Subtype::BoundedInteger { min, max } => self.bounded(&option.path, min, max, raw),
        };
        Ok(OptionValue::Int(validated))
    }

    /// Clamp to `[0, 100]`
    pub fn percentage(&self, path: &str, value: i64) -> i64 {
        if value < 0 {
            self.sink
                .warn(&format!("Percentage for {path} cannot be less than 0."));
            0
        } else if value > 100 {
            self.sink
                .warn(&format!("Percentage for {path} cannot be greater than 100."));
            100
        } else {
            value
        }
    }

    /// Clamp to `[0, h]` for the height `h` of every world in `worlds`
    ///
    /// Worlds are checked in lexical order and the value only ever tightens,
    /// so the result satisfies the lowest ceiling. Unloaded worlds use the
    /// fallback ceiling. With no worlds only the lower bound applies, since
    /// such a layer (the base) is not tied to any world's height.
    pub fn vertical(&self, path: &str, worlds: &[String], value: i64) -> i64 {
        let mut value = value;
        if value < 0 {
            self.sink
                .warn(&format!("Y coordinate for {path} cannot be less than 0."));
            value = 0;
        }

        let ordered: BTreeSet<&str> = worlds.iter().map(String::as_str).collect();
        if ordered.is_empty() {
            return value;
        }

        let fallback = self.fallback_ceiling();
        for world in ordered {
            let ceiling = if self.heights.is_loaded(world) {
                self.heights.max_height(world)
            } else {
                fallback
            };
            if value > ceiling {
                self.sink.warn(&format!(
                    "Y coordinate for {path} is greater than the max height for world {world}."
                ));
                value = ceiling;
            }
        }
        value
    }

    /// Clamp to `[min, max]`
    ///
    /// Values below `min` become 0 under [`BoundsFloor::Zero`].
    pub fn bounded(&self, path: &str, min: i64, max: i64, value: i64) -> i64 {
        if value < min {
            let floor = match self.bounds_floor {
                BoundsFloor::Zero => 0,
                BoundsFloor::Minimum => min,
            };
            self.sink
                .warn(&format!("Value for {path} cannot be smaller than {floor}."));
            floor
        } else if value > max {
            self.sink
                .warn(&format!("Value for {path} cannot be greater than {max}."));
            max
        } else {
            value
        }
    }

    /// Height of the first loaded world, or the default ceiling
    fn fallback_ceiling(&self) -> i64 {
        self.heights
            .loaded_worlds()
            .first()
            .map_or(self.default_ceiling, |w| self.heights.max_height(w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::world::StaticWorlds;

    fn worlds(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_percentage_clamps() {
        let heights = StaticWorlds::new();
        let sink = MemorySink::new();
        let validator = LayerValidator::new(&heights, &sink);

        assert_eq!(validator.percentage("p", -5), 0);
        assert_eq!(sink.len(), 1);
        assert_eq!(validator.percentage("p", 150), 100);
        assert_eq!(sink.len(), 2);
        assert_eq!(validator.percentage("p", 42), 42);
        assert_eq!(sink.len(), 2);
        assert_eq!(validator.percentage("p", 0), 0);
        assert_eq!(validator.percentage("p", 100), 100);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_vertical_strictest_world_wins() {
        let heights = StaticWorlds::new().world("low", 128).world("high", 256);
        let sink = MemorySink::new();
        let validator = LayerValidator::new(&heights, &sink);

        assert_eq!(validator.vertical("y", &worlds(&["high", "low"]), 200), 128);
        assert_eq!(sink.len(), 1);
        assert!(sink.messages()[0].contains("world low"));

        sink.clear();
        assert_eq!(validator.vertical("y", &worlds(&["low", "high"]), 200), 128);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_vertical_negative_and_within_bounds() {
        let heights = StaticWorlds::new().world("world", 256);
        let sink = MemorySink::new();
        let validator = LayerValidator::new(&heights, &sink);

        assert_eq!(validator.vertical("y", &worlds(&["world"]), -3), 0);
        assert_eq!(sink.len(), 1);
        assert_eq!(validator.vertical("y", &worlds(&["world"]), 64), 64);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_vertical_unloaded_world_uses_fallback() {
        let sink = MemorySink::new();

        let none_loaded = StaticWorlds::new();
        let validator = LayerValidator::new(&none_loaded, &sink).default_ceiling(255);
        assert_eq!(validator.vertical("y", &worlds(&["ghost"]), 300), 255);

        let one_loaded = StaticWorlds::new().world("alpha", 100);
        let validator = LayerValidator::new(&one_loaded, &sink);
        assert_eq!(validator.vertical("y", &worlds(&["ghost"]), 300), 100);

        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_vertical_without_worlds_only_floors() {
        let heights = StaticWorlds::new().world("alpha", 128).world("zeta", 384);
        let sink = MemorySink::new();
        let validator = LayerValidator::new(&heights, &sink);

        assert_eq!(validator.vertical("y", &[], 300), 300);
        assert_eq!(validator.vertical("y", &[], 5000), 5000);
        assert!(sink.is_empty());

        assert_eq!(validator.vertical("y", &[], -1), 0);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_vertical_duplicate_worlds_checked_once() {
        let heights = StaticWorlds::new().world("low", 128);
        let sink = MemorySink::new();
        let validator = LayerValidator::new(&heights, &sink);

        assert_eq!(validator.vertical("y", &worlds(&["low", "low"]), 200), 128);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_bounded_keeps_zero_floor_by_default() {
        let heights = StaticWorlds::new();
        let sink = MemorySink::new();
        let validator = LayerValidator::new(&heights, &sink);

        assert_eq!(validator.bounded("h", 1, 20, 0), 0);
        assert_eq!(validator.bounded("h", 1, 20, -7), 0);
        assert_eq!(validator.bounded("h", 1, 20, 25), 20);
        assert_eq!(validator.bounded("h", 1, 20, 1), 1);
        assert_eq!(validator.bounded("h", 1, 20, 20), 20);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_bounded_minimum_floor() {
        let heights = StaticWorlds::new();
        let sink = MemorySink::new();
        let validator = LayerValidator::new(&heights, &sink).bounds_floor(BoundsFloor::Minimum);

        assert_eq!(validator.bounded("h", 1, 20, 0), 1);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_validate_dispatch() {
        let heights = StaticWorlds::new();
        let sink = MemorySink::new();
        let validator = LayerValidator::new(&heights, &sink);

        let plain = OptionDescriptor::integer("plain", 0);
        assert_eq!(
            validator.validate(&plain, &[], OptionValue::Int(5000)).unwrap(),
            OptionValue::Int(5000)
        );

        let chance = OptionDescriptor::integer("chance", 0).percentage();
        assert_eq!(
            validator.validate(&chance, &[], OptionValue::Int(500)).unwrap(),
            OptionValue::Int(100)
        );

        let text = OptionDescriptor::string("text", "a");
        assert_eq!(
            validator.validate(&text, &[], OptionValue::from("b")).unwrap(),
            OptionValue::from("b")
        );
    }

    #[test]
    fn test_validate_subtype_on_non_integer_is_fatal() {
        let heights = StaticWorlds::new();
        let sink = MemorySink::new();
        let validator = LayerValidator::new(&heights, &sink);

        let mut speed = OptionDescriptor::double("speed", 1.0);
        speed.subtype = Some(Subtype::Percentage);

        let err = validator
            .validate(&speed, &[], OptionValue::Double(2.0))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedSubtype { .. }));
    }
}
