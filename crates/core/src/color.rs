//! Button color resolution.

use std::collections::HashMap;

use crate::event::{ButtonId, Category};
use crate::feature_group::{FeatureGroup, Surface};

/// Index into a device color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ColorIndex(pub u8);

impl ColorIndex {
    /// Neutral sentinel, the LED is switched off
    pub const OFF: ColorIndex = ColorIndex(0);

    pub const fn new(index: u8) -> Self {
        ColorIndex(index)
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

impl From<u8> for ColorIndex {
    fn from(index: u8) -> Self {
        ColorIndex(index)
    }
}

/// Maps buttons to colors with a fixed fallback chain:
/// the active group's opinion, then the category default table, then
/// [`ColorIndex::OFF`].
#[derive(Debug, Clone, Default)]
pub struct ButtonColorResolver {
    defaults: HashMap<(Category, ButtonId), ColorIndex>,
}

impl ButtonColorResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback color of `button` for every group in `category`.
    pub fn set_default(&mut self, category: Category, button: ButtonId, color: ColorIndex) {
        self.defaults.insert((category, button), color);
    }

    pub fn default_color(&self, category: Category, button: ButtonId) -> ColorIndex {
        self.defaults
            .get(&(category, button))
            .copied()
            .unwrap_or(ColorIndex::OFF)
    }

    pub fn resolve<S: Surface>(
        &self,
        category: Category,
        button: ButtonId,
        active: Option<&dyn FeatureGroup<S>>,
        model: &S::Model,
    ) -> ColorIndex {
        active
            .and_then(|group| group.button_color(model, button))
            .unwrap_or_else(|| self.default_color(category, button))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ButtonEvent;
    use crate::feature_group::Context;
    use crate::Result;

    struct TestSurface;

    impl Surface for TestSurface {
        type Model = bool;
        type ModeId = u8;
        type ViewId = u8;
    }

    /// Lights row button 0 when the model flag is set, nothing else
    struct FlagMode;

    impl FeatureGroup<TestSurface> for FlagMode {
        fn name(&self) -> &str {
            "Flag"
        }

        fn on_event(
            &mut self,
            _cx: &mut Context<'_, TestSurface>,
            _row: u8,
            _index: u8,
            _event: ButtonEvent,
        ) -> Result<()> {
            Ok(())
        }

        fn button_color(&self, model: &bool, button: ButtonId) -> Option<ColorIndex> {
            (*model && button == ButtonId::row(0, 0)).then_some(ColorIndex(5))
        }
    }

    #[test]
    fn test_fallback_chain() {
        let mut resolver = ButtonColorResolver::new();
        resolver.set_default(Category::Mode, ButtonId::row(0, 0), ColorIndex(2));
        resolver.set_default(Category::Mode, ButtonId::row(0, 1), ColorIndex(3));

        let mode = FlagMode;
        let group: Option<&dyn FeatureGroup<TestSurface>> = Some(&mode);

        // Group opinion wins
        assert_eq!(
            resolver.resolve(Category::Mode, ButtonId::row(0, 0), group, &true),
            ColorIndex(5)
        );
        // Group has no opinion, category default
        assert_eq!(
            resolver.resolve(Category::Mode, ButtonId::row(0, 0), group, &false),
            ColorIndex(2)
        );
        assert_eq!(
            resolver.resolve(Category::Mode, ButtonId::row(0, 1), group, &true),
            ColorIndex(3)
        );
        // Neither, sentinel
        assert_eq!(
            resolver.resolve(Category::Mode, ButtonId::row(1, 1), group, &true),
            ColorIndex::OFF
        );
        // Defaults are per category
        assert_eq!(
            resolver.resolve(Category::View, ButtonId::row(0, 1), group, &true),
            ColorIndex::OFF
        );
    }

    #[test]
    fn test_no_active_group_uses_defaults() {
        let mut resolver = ButtonColorResolver::new();
        resolver.set_default(Category::View, ButtonId::pad(0, 0), ColorIndex(9));

        assert_eq!(
            resolver.resolve::<TestSurface>(Category::View, ButtonId::pad(0, 0), None, &true),
            ColorIndex(9)
        );
        assert_eq!(
            resolver.resolve::<TestSurface>(Category::View, ButtonId::pad(1, 0), None, &true),
            ColorIndex::OFF
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = ButtonColorResolver::new();
        let mode = FlagMode;
        let first = resolver.resolve::<TestSurface>(
            Category::Mode,
            ButtonId::row(0, 0),
            Some(&mode),
            &true,
        );
        for _ in 0..10 {
            assert_eq!(
                resolver.resolve::<TestSurface>(
                    Category::Mode,
                    ButtonId::row(0, 0),
                    Some(&mode),
                    &true
                ),
                first
            );
        }
    }
}
