//! # Filter Controller
//!
//! The controller is the single owner of filter state on a page. One instance
//! is constructed per page and handed to the event bindings:
//!
//! | Event | Method |
//! |-------|--------|
//! | toggle button click | [`FilterController::toggle`] |
//! | any document click | [`FilterController::on_document_click`] |
//! | checkbox change | [`FilterController::on_input_change`] |
//! | "Apply" button | [`FilterController::apply`] |
//! | "Clear" button | [`FilterController::clear_all`] |
//! | page load | [`FilterController::bootstrap`] |
//!
//! ## Deferred Filtering
//!
//! Changing an input only refreshes the badge. The listing is filtered when
//! the user applies, or once at load when the URL carries a seed value.
//!
//! ## Failure Boundary
//!
//! Every public method is a boundary and returns nothing. Failures never
//! escape into the host page:
//!
//! - No filter panel: the page does not use filtering, the call is a no-op.
//! - No badge: badge updates are skipped, the rest of the call proceeds.
//! - An item gone before its marker is written: that item is skipped.
//! - Anything else: logged at error level, the call is abandoned.

use crate::config::FilterSettings;
use crate::error::{Anchor, FilterError, Result};
use crate::facets::Facet;
use crate::index::ItemIndex;
use crate::matcher::{evaluate, VisibilitySet};
use crate::port::{Badge, ListingPort};
use crate::selection::Selection;

/// Visibility of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    Open,
    #[default]
    Closed,
}

/// Where a document click landed, relative to the filter surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Panel,
    Toggle,
    Outside,
}

pub struct FilterController<P: ListingPort> {
    port: P,
    settings: FilterSettings,
    selection: Selection,
    surface: Surface,
    visibility: Option<VisibilitySet>,
}

impl<P: ListingPort> FilterController<P> {
    pub fn new(port: P, settings: FilterSettings) -> Self {
        port.set_hidden_class(&settings.hidden_class);
        Self {
            port,
            settings,
            selection: Selection::new(),
            surface: Surface::Closed,
            visibility: None,
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// The outcome of the last apply or clear, if any.
    pub fn visibility(&self) -> Option<&VisibilitySet> {
        self.visibility.as_ref()
    }

    // --- Surface ---

    pub fn open(&mut self) {
        self.guarded("open", |c| c.set_surface(Surface::Open));
    }

    pub fn close(&mut self) {
        self.guarded("close", |c| c.set_surface(Surface::Closed));
    }

    pub fn toggle(&mut self) {
        let next = match self.surface {
            Surface::Open => Surface::Closed,
            Surface::Closed => Surface::Open,
        };
        self.guarded("toggle", |c| c.set_surface(next));
    }

    /// Close the surface when the user clicks anywhere outside it.
    pub fn on_document_click(&mut self, target: ClickTarget) {
        if self.surface == Surface::Open && target == ClickTarget::Outside {
            self.close();
        }
    }

    // --- Selection ---

    pub fn on_input_change(&mut self) {
        self.guarded("input_change", |c| {
            c.sync_selection()?;
            c.publish_badge()
        });
    }

    pub fn clear_all(&mut self) {
        self.guarded("clear_all", |c| c.try_clear_all());
    }

    pub fn apply(&mut self) {
        self.guarded("apply", |c| c.try_apply());
    }

    /// Pre-select a category from the page URL and filter immediately.
    pub fn seed_from_query(&mut self, param: &str) {
        self.guarded("seed_from_query", |c| c.try_seed(param));
    }

    /// Page-load entry point: initial badge, then the URL seed.
    pub fn bootstrap(&mut self) {
        self.guarded("bootstrap", |c| {
            c.sync_selection()?;
            c.publish_badge()?;
            let param = c.settings.query_param.clone();
            c.try_seed(&param)
        });
    }

    // --- Internals ---

    fn guarded<F>(&mut self, op: &'static str, f: F)
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        if !self.port.has_panel() {
            tracing::debug!(op, "filter panel not present, skipping");
            return;
        }
        match f(self) {
            Ok(()) => {}
            Err(FilterError::MissingAnchor(anchor)) => {
                tracing::debug!(op, %anchor, "anchor not present, skipping");
            }
            Err(error) => {
                tracing::error!(op, %error, "filter operation failed");
            }
        }
    }

    fn set_surface(&mut self, surface: Surface) -> Result<()> {
        self.port.set_panel_open(surface == Surface::Open)?;
        self.surface = surface;
        Ok(())
    }

    fn sync_selection(&mut self) -> Result<()> {
        let inputs = self.port.facet_inputs()?;
        self.selection = Selection::from_inputs(&inputs);
        Ok(())
    }

    fn publish_badge(&self) -> Result<()> {
        let badge = Badge::from_count(self.selection.active_count());
        match self.port.set_badge(badge) {
            Err(FilterError::MissingAnchor(Anchor::Badge)) => {
                tracing::debug!("filter badge not present");
                Ok(())
            }
            other => other,
        }
    }

    fn try_clear_all(&mut self) -> Result<()> {
        for input in self.port.facet_inputs()?.iter().filter(|i| i.checked) {
            self.port.set_input_checked(&input.id, false)?;
        }
        self.selection.clear();
        self.publish_badge()?;

        let index = ItemIndex::new(self.port.items()?);
        let visibility = VisibilitySet::show_all(&index);
        self.write_visibility(&visibility)?;
        self.visibility = Some(visibility);
        Ok(())
    }

    fn try_apply(&mut self) -> Result<()> {
        self.sync_selection()?;
        let index = ItemIndex::new(self.port.items()?);
        let visibility = evaluate(&self.selection, &index, &self.settings.buckets);
        tracing::debug!(
            active = self.selection.active_count(),
            visible = visibility.visible.len(),
            hidden = visibility.hidden.len(),
            "applied filters"
        );
        self.write_visibility(&visibility)?;
        self.visibility = Some(visibility);
        self.set_surface(Surface::Closed)
    }

    /// Items that vanished since they were read are skipped; the rest of the
    /// listing is still written.
    fn write_visibility(&self, visibility: &VisibilitySet) -> Result<()> {
        let writes = visibility
            .visible
            .iter()
            .map(|id| (id, true))
            .chain(visibility.hidden.iter().map(|id| (id, false)));
        for (id, visible) in writes {
            match self.port.set_item_visible(id, visible) {
                Ok(()) => {}
                Err(FilterError::MissingAnchor(Anchor::Item(missing))) => {
                    tracing::warn!(item = %missing, "item vanished before its visibility was written");
                }
                Err(error) => return Err(error),
            }
        }
        Ok(())
    }

    fn try_seed(&mut self, param: &str) -> Result<()> {
        let Some(query) = self.port.query_string()? else {
            return Ok(());
        };
        let Some(value) = query_value(&query, param) else {
            return Ok(());
        };
        if value.is_empty() {
            return Ok(());
        }

        let mut matched = false;
        for input in self.port.facet_inputs()? {
            if input.facet() == Some(Facet::Category) && input.value == value {
                self.port.set_input_checked(&input.id, true)?;
                matched = true;
            }
        }
        if !matched {
            tracing::warn!(param, value = %value, "seed value matches no category input");
        }

        self.sync_selection()?;
        self.publish_badge()?;
        self.try_apply()
    }
}

/// First value of `param` in a URL query string.
fn query_value(query: &str, param: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
}
