/// Editing-screen state
///
/// One struct owns everything the screen shows: the active filter, the
/// slider values, the picked source bitmap and the processed result. Every
/// mutation goes through the methods here, and each one re-renders the
/// processed image in full, so the preview can never show a stale
/// combination of source, filter and parameters.

use image::{DynamicImage, RgbaImage};

use crate::filter::{engine, FilterKind, ParamKey};
use crate::state::params::FilterParams;

pub struct EditorState {
    /// The filter applied to the source image
    pub filter: FilterKind,
    /// The three slider values (all kept, even ones the filter ignores)
    pub params: FilterParams,
    /// The picked photo, if any
    pub source: Option<DynamicImage>,
    /// The latest successful render of source + filter + params
    pub processed: Option<RgbaImage>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            filter: FilterKind::SepiaTone,
            params: FilterParams::default(),
            source: None,
            processed: None,
        }
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously saved filter choice and parameter values
    pub fn restore(filter: FilterKind, params: FilterParams) -> Self {
        Self {
            filter,
            params,
            ..Self::default()
        }
    }

    /// Replace the source photo and render it with the current filter
    pub fn set_source(&mut self, image: DynamicImage) {
        self.source = Some(image);
        self.recompute();
    }

    /// Switch filters, re-rendering the existing source (if any) with the
    /// currently stored parameter values
    pub fn select_filter(&mut self, filter: FilterKind) {
        self.filter = filter;
        self.recompute();
    }

    /// Change one parameter and re-render with the other two unchanged
    pub fn set_parameter(&mut self, key: ParamKey, value: f32) {
        self.params.set(key, value);
        self.recompute();
    }

    pub fn has_processed(&self) -> bool {
        self.processed.is_some()
    }

    /// Re-render the processed image from the current source, filter and
    /// parameters. With no source this is a no-op; a failed render keeps
    /// the previous processed image on screen as last-known-good.
    fn recompute(&mut self) {
        self.recompute_with(engine::render);
    }

    fn recompute_with<F>(&mut self, render: F)
    where
        F: Fn(&DynamicImage, FilterKind, &FilterParams) -> Option<RgbaImage>,
    {
        let Some(source) = &self.source else {
            return;
        };

        match render(source, self.filter, &self.params) {
            Some(output) => self.processed = Some(output),
            None => eprintln!(
                "⚠️  {} produced no output, keeping the previous image",
                self.filter.label()
            ),
        }
    }
}
