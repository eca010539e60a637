#![forbid(unsafe_code)]

use core::time::Duration;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::{Interval, Timeout};
use rinkside_core::perf::PerfMonitor;
use rinkside_core::reveal::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD, RevealTracker};
use rinkside_core::{Site, particles};
use wasm_bindgen::prelude::*;
use web_sys::{
    Event, EventTarget, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, TouchEvent, WheelEvent,
};
use web_time::Instant;

use crate::dom::{self, MagazineDom, Page};
use crate::input::{AutoplayTimer, Reaction, SiteInput, dispatch};
use crate::{WebOptions, logging, markup};

const WELCOME: &str =
    "Hockey Club Thaur Website geladen! Verwende \u{2191}\u{2193} oder scrolle zum Navigieren.";

/// Club site controller exported to JS.
///
/// ```js
/// const site = new RinksideSite({ cooldownMs: 1000, logLevel: "debug" });
/// document.addEventListener("DOMContentLoaded", () => site.mount());
/// ```
#[wasm_bindgen]
pub struct RinksideSite {
    options: WebOptions,
    perf: PerfMonitor,
    controller: Option<Rc<Controller>>,
}

#[wasm_bindgen]
impl RinksideSite {
    /// Parse options and install the console logger and panic hook.
    ///
    /// `options` is any JSON-serializable object; unknown keys are ignored.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<JsValue>) -> Result<RinksideSite, JsValue> {
        console_error_panic_hook::set_once();

        let options = match options.filter(|v| !v.is_undefined() && !v.is_null()) {
            Some(value) => {
                let json: String = js_sys::JSON::stringify(&value)?.into();
                WebOptions::from_json(&json).map_err(|e| js_error(&e.to_string()))?
            }
            None => WebOptions::default(),
        };
        logging::init(options.log_config());

        Ok(Self {
            options,
            perf: PerfMonitor::new(),
            controller: None,
        })
    }

    /// Attach to the already-rendered page. Calling it twice is a no-op.
    pub fn mount(&mut self) -> Result<(), JsValue> {
        if self.controller.is_some() {
            tracing::warn!("site already mounted");
            return Ok(());
        }
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| js_error("no document"))?;

        let page = Page::query(document)?;
        self.perf.mark("dom-ready");

        let config = self.options.site.clone();
        let magazine = MagazineDom::build(&page.document, config.magazine_pages)?;
        let site = Site::new(config, page.section_ids(), magazine.is_some())
            .map_err(|e| js_error(&e.to_string()))?;

        tracing::info!("Total sections: {}", site.navigator().len());
        for (i, id) in site.navigator().ids().iter().enumerate() {
            tracing::info!("Section {i}: {id}");
        }

        let controller = Rc::new(Controller {
            reveal: RefCell::new(RevealTracker::new(page.reveal_targets.len())),
            site: RefCell::new(site),
            page,
            magazine,
            origin: Instant::now(),
            listeners: RefCell::new(Vec::new()),
            timers: RefCell::new(Timers::default()),
            observer: RefCell::new(None),
        });
        controller.start()?;
        self.controller = Some(controller);

        self.perf.mark("initialized");
        tracing::info!("{WELCOME}");
        Ok(())
    }

    /// Feed one scripted input, e.g. `{"kind":"key","key":"ArrowDown"}`.
    pub fn input(&self, event: &str) -> Result<(), JsValue> {
        let controller = self
            .controller
            .as_ref()
            .ok_or_else(|| js_error("site not mounted"))?;
        let input = SiteInput::from_json_str(event).map_err(|e| js_error(&e.to_string()))?;
        controller.handle(input, None);
        Ok(())
    }

    /// Index of the active section.
    #[wasm_bindgen(js_name = currentSection)]
    pub fn current_section(&self) -> usize {
        self.controller
            .as_ref()
            .map_or(0, |c| c.site.borrow().navigator().current())
    }

    /// Current magazine page, or `undefined` without a magazine.
    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> Option<usize> {
        let controller = self.controller.as_ref()?;
        let site = controller.site.borrow();
        site.magazine().map(|m| m.current())
    }

    /// Milliseconds from construction to the named startup mark.
    #[wasm_bindgen(js_name = perfMark)]
    pub fn perf_mark(&self, name: &str) -> Option<f64> {
        self.perf.get(name)
    }

    /// Remove every listener, timer and observer installed by `mount`.
    pub fn destroy(&mut self) {
        if let Some(controller) = self.controller.take() {
            controller.teardown();
        }
    }
}

#[derive(Default)]
struct Timers {
    wheel: Option<Timeout>,
    autoplay: Option<Interval>,
    loading: Option<Timeout>,
    easter_egg: Option<Timeout>,
    preload: Option<Interval>,
    preload_reset: Option<Timeout>,
}

/// Which parts of the magazine to redraw.
#[derive(Clone, Copy)]
struct MagazineParts {
    pages: bool,
    button: bool,
    progress: bool,
}

impl MagazineParts {
    const ALL: Self = Self {
        pages: true,
        button: true,
        progress: true,
    };
}

type RevealCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct RevealObserver {
    observer: IntersectionObserver,
    _callback: RevealCallback,
}

struct Controller {
    site: RefCell<Site>,
    page: Page,
    magazine: Option<MagazineDom>,
    reveal: RefCell<RevealTracker>,
    origin: Instant,
    listeners: RefCell<Vec<EventListener>>,
    timers: RefCell<Timers>,
    observer: RefCell<Option<RevealObserver>>,
}

impl Controller {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn start(self: &Rc<Self>) -> Result<(), JsValue> {
        self.render_sections();
        self.render_magazine(MagazineParts::ALL);

        let count = self.site.borrow().config().particle_count;
        self.page
            .spawn_particles(&particles::generate(&mut rand::rng(), count))?;

        self.page.prepare_reveal();
        if let Err(err) = self.observe_reveals() {
            tracing::warn!(?err, "fade-in disabled");
        }

        self.install_listeners()?;
        self.schedule_startup_timers();
        Ok(())
    }

    /// Apply one input and carry out the reaction. `event` is the DOM event
    /// that produced it, if any.
    fn handle(self: &Rc<Self>, input: SiteInput, event: Option<&Event>) {
        let now = self.now();
        let reaction = dispatch(&mut self.site.borrow_mut(), input, now);
        if reaction.prevent_default
            && let Some(event) = event
        {
            event.prevent_default();
        }
        self.apply(reaction);
    }

    fn apply(self: &Rc<Self>, reaction: Reaction) {
        if reaction.render_sections {
            self.render_sections();
        }
        self.render_magazine(MagazineParts {
            pages: reaction.render_magazine,
            button: reaction.render_autoplay_button,
            progress: reaction.render_progress,
        });
        if let Some(timer) = reaction.autoplay_timer {
            self.set_autoplay_timer(timer);
        }
        if let Some(delay) = reaction.wheel_timer {
            let weak = Rc::downgrade(self);
            let timeout = Timeout::new(markup::timer_ms(delay.as_millis() as u64), move || {
                with(&weak, |c| c.handle(SiteInput::WheelSettled, None));
            });
            self.timers.borrow_mut().wheel = Some(timeout);
        }
        if reaction.easter_egg {
            self.play_easter_egg();
        }
        if let Some(state) = reaction.particles {
            self.page.set_particles_play_state(state);
        }
    }

    fn render_sections(&self) {
        let view = self.site.borrow().navigator().view();
        self.page.render_sections(&view);
    }

    fn render_magazine(&self, parts: MagazineParts) {
        let Some(dom) = &self.magazine else {
            return;
        };
        let site = self.site.borrow();
        let Some(magazine) = site.magazine() else {
            return;
        };
        if parts.pages {
            dom.render(&magazine.view());
        }
        if parts.button {
            dom.render_autoplay_button(magazine.autoplay_view());
        }
        if parts.progress {
            dom.render_progress(magazine.autoplay_view());
        }
    }

    fn set_autoplay_timer(self: &Rc<Self>, timer: AutoplayTimer) {
        let interval = match timer {
            AutoplayTimer::Start { token, every_ms } => {
                let weak = Rc::downgrade(self);
                Some(Interval::new(markup::timer_ms(every_ms), move || {
                    with(&weak, |c| c.handle(SiteInput::AutoplayTick { token }, None));
                }))
            }
            AutoplayTimer::Cancel => None,
        };
        // Drop the previous interval outside the borrow.
        let previous = std::mem::replace(&mut self.timers.borrow_mut().autoplay, interval);
        drop(previous);
    }

    fn play_easter_egg(self: &Rc<Self>) {
        let duration_ms = self.site.borrow().config().easter_egg_ms;
        self.page
            .set_body_animation(Some(&markup::easter_egg_animation(duration_ms)));
        let weak = Rc::downgrade(self);
        let reset = Timeout::new(markup::timer_ms(duration_ms), move || {
            with(&weak, |c| c.page.set_body_animation(None));
        });
        self.timers.borrow_mut().easter_egg = Some(reset);
    }

    fn schedule_startup_timers(self: &Rc<Self>) {
        let config = self.site.borrow().config().clone();

        let weak = Rc::downgrade(self);
        let loading = Timeout::new(markup::timer_ms(config.loading_delay_ms), move || {
            with(&weak, |c| c.page.hide_loading_overlay());
        });

        let hold_ms = markup::timer_ms(config.preload_hold_ms);
        let preload = config.preload_interval().map(|every| {
            let weak = Rc::downgrade(self);
            Interval::new(markup::timer_ms(every.as_millis() as u64), move || {
                with(&weak, |c| c.preload_adjacent(hold_ms));
            })
        });

        let mut timers = self.timers.borrow_mut();
        timers.loading = Some(loading);
        timers.preload = preload;
    }

    fn preload_adjacent(self: &Rc<Self>, hold_ms: u32) {
        let adjacent = self.site.borrow().navigator().adjacent();
        for &index in &adjacent {
            self.page.set_will_change(index, markup::PRELOAD_WILL_CHANGE);
        }
        let weak = Rc::downgrade(self);
        let reset = Timeout::new(hold_ms, move || {
            with(&weak, |c| {
                for &index in &adjacent {
                    c.page.set_will_change(index, "auto");
                }
            });
        });
        self.timers.borrow_mut().preload_reset = Some(reset);
    }

    fn observe_reveals(self: &Rc<Self>) -> Result<(), JsValue> {
        if self.page.reveal_targets.is_empty() {
            return Ok(());
        }
        let weak = Rc::downgrade(self);
        let callback: RevealCallback = Closure::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let Some(controller) = weak.upgrade() else {
                    return;
                };
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    let Some(index) = dom::reveal_index(&target) else {
                        continue;
                    };
                    let revealed = controller
                        .reveal
                        .borrow_mut()
                        .on_intersect(index, entry.is_intersecting());
                    if revealed {
                        dom::reveal(&target);
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        init.set_root_margin(REVEAL_ROOT_MARGIN);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for el in &self.page.reveal_targets {
            observer.observe(el);
        }
        *self.observer.borrow_mut() = Some(RevealObserver {
            observer,
            _callback: callback,
        });
        Ok(())
    }

    fn install_listeners(self: &Rc<Self>) -> Result<(), JsValue> {
        let window: EventTarget = web_sys::window()
            .ok_or_else(|| js_error("no window"))?
            .into();
        let document: EventTarget = self.page.document.clone().into();
        let active = EventListenerOptions::enable_prevent_default();
        let mut listeners = Vec::new();

        listeners.push(self.listen_with(&window, "wheel", active, |event| {
            let delta_y = event.dyn_ref::<WheelEvent>()?.delta_y();
            Some(SiteInput::Wheel { delta_y })
        }));
        listeners.push(self.listen_with(&document, "keydown", active, |event| {
            let key = event.dyn_ref::<KeyboardEvent>()?.key();
            Some(SiteInput::Key { key })
        }));
        listeners.push(self.listen(&window, "touchstart", |event| {
            Some(SiteInput::TouchStart { y: first_touch_y(event)? })
        }));
        listeners.push(self.listen_with(&window, "touchmove", active, |event| {
            Some(SiteInput::TouchMove { y: first_touch_y(event)? })
        }));
        let page = &self.page;
        let doc = page.document.clone();
        listeners.push(self.listen(&document, "visibilitychange", move |_| {
            Some(SiteInput::Visibility {
                hidden: doc.hidden(),
            })
        }));

        for (index, dot) in page.nav_dots.iter().enumerate() {
            listeners.push(self.listen(dot, "click", move |_| Some(SiteInput::NavDot { index })));
        }
        for anchor in &page.anchors {
            let href = anchor.get_attribute("href").unwrap_or_default();
            listeners.push(self.listen_with(anchor, "click", active, move |_| {
                Some(SiteInput::Anchor { href: href.clone() })
            }));
        }

        if let Some(magazine) = &self.magazine {
            if let Some(prev) = &magazine.prev {
                listeners.push(self.listen(prev, "click", |_| Some(SiteInput::MagazinePrev)));
            }
            if let Some(next) = &magazine.next {
                listeners.push(self.listen(next, "click", |_| Some(SiteInput::MagazineNext)));
            }
            if let Some(button) = &magazine.autoplay_button {
                listeners.push(self.listen(button, "click", |_| Some(SiteInput::AutoplayToggle)));
            }
            for (index, dot) in magazine.indicators.iter().enumerate() {
                listeners.push(self.listen(dot, "click", move |_| {
                    Some(SiteInput::MagazineDot { index })
                }));
            }
        }

        *self.listeners.borrow_mut() = listeners;
        Ok(())
    }

    fn listen<F>(
        self: &Rc<Self>,
        target: &EventTarget,
        kind: &'static str,
        to_input: F,
    ) -> EventListener
    where
        F: Fn(&Event) -> Option<SiteInput> + 'static,
    {
        self.listen_with(target, kind, EventListenerOptions::default(), to_input)
    }

    fn listen_with<F>(
        self: &Rc<Self>,
        target: &EventTarget,
        kind: &'static str,
        options: EventListenerOptions,
        to_input: F,
    ) -> EventListener
    where
        F: Fn(&Event) -> Option<SiteInput> + 'static,
    {
        let weak = Rc::downgrade(self);
        EventListener::new_with_options(target, kind, options, move |event: &Event| {
            if let Some(input) = to_input(event) {
                with(&weak, |c| c.handle(input, Some(event)));
            }
        })
    }

    fn teardown(&self) {
        self.listeners.borrow_mut().clear();
        *self.timers.borrow_mut() = Timers::default();
        if let Some(reveal) = self.observer.borrow_mut().take() {
            reveal.observer.disconnect();
        }
        if let Some(magazine) = self.site.borrow_mut().magazine_mut() {
            magazine.stop_autoplay();
        }
        tracing::debug!("site destroyed");
    }
}

/// Run `f` if the controller is still alive.
fn with(weak: &Weak<Controller>, f: impl FnOnce(&Rc<Controller>)) {
    if let Some(controller) = weak.upgrade() {
        f(&controller);
    }
}

fn first_touch_y(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.client_y()))
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}
