//! Off-screen measuring for rows without a height of their own.

use tiffin_core::{AnyRenderable, Container, EdgeInsets, Size};
use tiffin_diff::collections::map::HashMap;

/// Sizing templates, one container per reuse identifier.
#[derive(Debug, Default)]
pub(crate) struct SizingCache {
    templates: HashMap<String, Container>,
    enabled: bool,
}

impl SizingCache {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            templates: HashMap::default(),
            enabled,
        }
    }

    /// Binds `component` to a template and asks its view for a height.
    /// Returns `None` when the view cannot measure itself.
    pub(crate) fn measure(
        &mut self,
        component: &AnyRenderable,
        width: f32,
        insets: EdgeInsets,
    ) -> Option<f32> {
        let available = Size::new(insets.inset_width(width), f32::INFINITY);
        let measured = if self.enabled {
            let template = self
                .templates
                .entry(component.reuse_identifier().to_string())
                .or_insert_with(|| Container::new(component.reuse_identifier()));
            fit(template, component, available)
        } else {
            fit(&mut Container::new(component.reuse_identifier()), component, available)
        };
        (measured > 0.0).then(|| measured + insets.vertical())
    }

    pub(crate) fn template_count(&self) -> usize {
        self.templates.len()
    }
}

fn fit(template: &mut Container, component: &AnyRenderable, available: Size) -> f32 {
    template.bind(component);
    template
        .view()
        .map_or(0.0, |view| view.fitting_size(available).height)
}
