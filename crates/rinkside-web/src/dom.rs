//! DOM lookup and projection.
//!
//! Everything here is existence-guarded: a missing element disables the
//! feature that needs it and is never an error. Failed style writes only
//! affect decoration and are logged at `debug`.

use rinkside_core::magazine::{AutoplayView, MagazineView};
use rinkside_core::navigator::SectionView;
use rinkside_core::particles::{ParticleDescriptor, PlayState};
use rinkside_core::reveal::{HIDDEN_STYLE, REVEAL_SELECTOR, REVEALED_STYLE};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use crate::markup;

/// Handles to every element the controller touches.
pub(crate) struct Page {
    pub document: Document,
    pub body: Option<HtmlElement>,
    pub sections: Vec<HtmlElement>,
    pub nav_dots: Vec<HtmlElement>,
    pub anchors: Vec<HtmlElement>,
    pub theme_meta: Option<Element>,
    pub loading_overlay: Option<Element>,
    pub particles_root: Option<Element>,
    pub reveal_targets: Vec<HtmlElement>,
}

impl Page {
    pub fn query(document: Document) -> Result<Self, JsValue> {
        Ok(Self {
            body: document.body(),
            sections: html_elements(&document, markup::SECTION_SELECTOR)?,
            nav_dots: html_elements(&document, markup::NAV_DOT_SELECTOR)?,
            anchors: html_elements(&document, markup::ANCHOR_SELECTOR)?,
            theme_meta: ensure_theme_meta(&document),
            loading_overlay: document.get_element_by_id(markup::LOADING_OVERLAY_ID),
            particles_root: document.get_element_by_id(markup::PARTICLES_ID),
            reveal_targets: html_elements(&document, REVEAL_SELECTOR)?,
            document,
        })
    }

    /// Section ids in document order; sections without an id get `""`.
    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|section| section.id()).collect()
    }

    pub fn render_sections(&self, view: &SectionView) {
        for (i, section) in self.sections.iter().enumerate() {
            set_class(section, markup::ACTIVE_CLASS, view.is_active(i));
        }
        for (i, dot) in self.nav_dots.iter().enumerate() {
            set_class(dot, markup::ACTIVE_CLASS, view.is_active(i));
        }
        if let Some(meta) = &self.theme_meta
            && let Err(err) = meta.set_attribute("content", view.theme_color)
        {
            tracing::debug!(?err, "theme-color update failed");
        }
    }

    pub fn hide_loading_overlay(&self) {
        if let Some(overlay) = &self.loading_overlay {
            set_class(overlay, markup::HIDDEN_CLASS, true);
        }
    }

    /// Append one `.particle` per descriptor to `#particles`.
    pub fn spawn_particles(&self, particles: &[ParticleDescriptor]) -> Result<(), JsValue> {
        let Some(root) = &self.particles_root else {
            return Ok(());
        };
        for particle in particles {
            let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
            el.set_class_name(markup::PARTICLE_CLASS);
            for (property, value) in particle.style() {
                set_style(&el, property, &value);
            }
            root.append_child(&el)?;
        }
        Ok(())
    }

    pub fn set_particles_play_state(&self, state: PlayState) {
        let Ok(particles) = html_elements(&self.document, markup::PARTICLE_SELECTOR) else {
            return;
        };
        for particle in &particles {
            set_style(particle, "animation-play-state", state.as_css());
        }
    }

    /// Set or clear the body animation used by the easter egg.
    pub fn set_body_animation(&self, animation: Option<&str>) {
        if let Some(body) = &self.body {
            set_style(body, "animation", animation.unwrap_or(""));
        }
    }

    /// Hide every reveal target and tag it with its slot index.
    pub fn prepare_reveal(&self) {
        for (i, el) in self.reveal_targets.iter().enumerate() {
            for (property, value) in HIDDEN_STYLE {
                set_style(el, property, value);
            }
            if let Err(err) = el.set_attribute(markup::REVEAL_INDEX_ATTR, &i.to_string()) {
                tracing::debug!(?err, "reveal index not set");
            }
        }
    }

    pub fn set_will_change(&self, index: usize, value: &str) {
        if let Some(section) = self.sections.get(index) {
            set_style(section, "will-change", value);
        }
    }
}

/// Reveal slot index of an observed element.
pub(crate) fn reveal_index(el: &Element) -> Option<usize> {
    el.get_attribute(markup::REVEAL_INDEX_ATTR)?.parse().ok()
}

pub(crate) fn reveal(el: &Element) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        for (property, value) in REVEALED_STYLE {
            set_style(el, property, value);
        }
    }
}

/// Magazine strip and its controls.
pub(crate) struct MagazineDom {
    pub strip: HtmlElement,
    pub indicators: Vec<HtmlElement>,
    pub current_label: Option<Element>,
    pub prev: Option<HtmlButtonElement>,
    pub next: Option<HtmlButtonElement>,
    pub autoplay_button: Option<Element>,
    pub progress: Option<HtmlElement>,
}

impl MagazineDom {
    /// Look up the magazine and create its indicators.
    ///
    /// Returns `None` when the page strip is missing.
    pub fn build(document: &Document, page_count: usize) -> Result<Option<Self>, JsValue> {
        let Some(strip) = html_element_by_id(document, markup::MAGAZINE_PAGES_ID) else {
            return Ok(None);
        };

        let mut indicators = Vec::with_capacity(page_count);
        if let Some(container) = document.get_element_by_id(markup::MAGAZINE_INDICATORS_ID) {
            for i in 0..page_count {
                let dot: HtmlElement = document.create_element("div")?.dyn_into()?;
                dot.set_class_name(markup::MAGAZINE_DOT_CLASS);
                set_class(&dot, markup::ACTIVE_CLASS, i == 0);
                container.append_child(&dot)?;
                indicators.push(dot);
            }
        }

        if let Some(total) = document.get_element_by_id(markup::TOTAL_PAGES_ID) {
            total.set_text_content(Some(&page_count.to_string()));
        }

        Ok(Some(Self {
            strip,
            indicators,
            current_label: document.get_element_by_id(markup::CURRENT_PAGE_ID),
            prev: button_by_id(document, markup::PREV_BUTTON_ID),
            next: button_by_id(document, markup::NEXT_BUTTON_ID),
            autoplay_button: document.get_element_by_id(markup::AUTOPLAY_BUTTON_ID),
            progress: html_element_by_id(document, markup::AUTOPLAY_PROGRESS_ID),
        }))
    }

    pub fn render(&self, view: &MagazineView) {
        set_style(&self.strip, "transform", &view.transform());
        if let Some(label) = &self.current_label {
            label.set_text_content(Some(&view.page_label()));
        }
        for (i, dot) in self.indicators.iter().enumerate() {
            set_class(dot, markup::ACTIVE_CLASS, view.is_active(i));
        }
        if let Some(prev) = &self.prev {
            prev.set_disabled(view.prev_disabled);
        }
        if let Some(next) = &self.next {
            next.set_disabled(view.next_disabled);
        }
    }

    /// Swap the autoplay button between its play and pause labels.
    pub fn render_autoplay_button(&self, autoplay: AutoplayView) {
        if let Some(button) = &self.autoplay_button {
            button.set_inner_html(markup::autoplay_label(autoplay.running));
        }
    }

    pub fn render_progress(&self, autoplay: AutoplayView) {
        if let Some(progress) = &self.progress {
            set_style(progress, "width", &markup::percent(autoplay.progress_percent));
        }
    }
}

fn html_elements(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

fn html_element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into().ok()
}

fn button_by_id(document: &Document, id: &str) -> Option<HtmlButtonElement> {
    document.get_element_by_id(id)?.dyn_into().ok()
}

/// Find `<meta name="theme-color">`, creating it in `<head>` if missing.
fn ensure_theme_meta(document: &Document) -> Option<Element> {
    if let Ok(Some(meta)) = document.query_selector(markup::THEME_META_SELECTOR) {
        return Some(meta);
    }
    let head = document.head()?;
    let meta = document.create_element("meta").ok()?;
    meta.set_attribute("name", "theme-color").ok()?;
    head.append_child(&meta).ok()?;
    Some(meta)
}

fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        tracing::debug!(?err, class, "class toggle failed");
    }
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = el.style().set_property(property, value) {
        tracing::debug!(?err, property, "style update failed");
    }
}
