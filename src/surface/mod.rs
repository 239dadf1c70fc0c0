//! Rendering surface lifecycle for the transaction history chart

mod export;

pub use export::{ExportFormat, ExportSurfaces, SurfaceId};

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::chart::{Breakpoints, ChartConfig, Theme, build_chart_config};
use crate::error::TxChartError;
use crate::price::PriceQuote;
use crate::records::TxHistoryRecord;
use crate::series::{Granularity, build_series, normalize};

/// Viewport or container size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// A drawing target bound to a container
pub trait RenderingSurface {
    type Handle: Clone + 'static;

    fn init(&mut self, container: &str) -> Self::Handle;
    fn lookup(&self, container: &str) -> Option<Self::Handle>;
    fn set_option(&mut self, handle: &Self::Handle, config: &ChartConfig)
    -> Result<(), TxChartError>;
    fn resize(&mut self, handle: &Self::Handle, size: Size);
    fn dispose(&mut self, handle: &Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ResizeListener = Box<dyn FnMut(Size)>;

/// Window-level resize events
pub struct Viewport {
    size: Size,
    next_id: u64,
    listeners: Vec<(ListenerId, ResizeListener)>,
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn add_resize_listener(&mut self, listener: ResizeListener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if `id` was not registered
    pub fn remove_resize_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Change the size and notify every listener
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        for (_, listener) in &mut self.listeners {
            listener(size);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Uninitialized,
    Mounted,
    Rendering,
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// No records: show the "No transactions available" message instead
    Placeholder,
    /// Records are in but the price quote has not loaded
    AwaitingQuote,
    Rendered { buckets: usize },
}

/// Inputs of one render pass, owned by the caller
pub struct RenderInputs<'a> {
    pub records: &'a [TxHistoryRecord],
    pub span: Option<u32>,
    pub today: NaiveDate,
    pub granularity: &'a Granularity,
    pub theme: &'a Theme,
}

struct Mount<H> {
    handle: H,
    listener: ListenerId,
    /// False when the surface was found through `lookup` and belongs to another view
    owned: bool,
}

/// Last pushed config and the breakpoints it was laid out for
#[derive(Default)]
struct Layout {
    breakpoints: Breakpoints,
    config: Option<ChartConfig>,
}

/// Owns one chart's surface handle and resize listener for the life of its view
pub struct ChartView<S: RenderingSurface + 'static> {
    container: String,
    surfaces: Rc<RefCell<S>>,
    viewport: Rc<RefCell<Viewport>>,
    mount: Option<Mount<S::Handle>>,
    layout: Rc<RefCell<Layout>>,
    state: ViewState,
}

impl<S: RenderingSurface + 'static> ChartView<S> {
    pub fn new(
        container: impl Into<String>,
        surfaces: Rc<RefCell<S>>,
        viewport: Rc<RefCell<Viewport>>,
    ) -> Self {
        Self {
            container: container.into(),
            surfaces,
            viewport,
            mount: None,
            layout: Rc::new(RefCell::new(Layout::default())),
            state: ViewState::Uninitialized,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Rebuild the chart from `inputs` and push it into the surface.
    ///
    /// The surface is only created once there are records and a quote.
    pub fn render(
        &mut self,
        inputs: &RenderInputs<'_>,
        quote: Option<&PriceQuote>,
    ) -> Result<RenderOutcome, TxChartError> {
        if self.state == ViewState::Disposed {
            return Err(TxChartError::Disposed);
        }
        if inputs.records.is_empty() {
            tracing::debug!(container = %self.container, "no transactions, showing placeholder");
            return Ok(RenderOutcome::Placeholder);
        }
        let Some(quote) = quote else {
            tracing::debug!(container = %self.container, "waiting for price quote");
            return Ok(RenderOutcome::AwaitingQuote);
        };

        let handle = self.ensure_mounted();
        let breakpoints = Breakpoints::for_width(self.viewport.borrow().size().width);

        let buckets = normalize(inputs.records, inputs.span, inputs.today);
        let series = build_series(&buckets, inputs.granularity, Some(quote));
        let bucket_count = series.len();
        let config = build_chart_config(series, inputs.granularity, inputs.theme, breakpoints);

        self.surfaces.borrow_mut().set_option(&handle, &config)?;
        *self.layout.borrow_mut() = Layout {
            breakpoints,
            config: Some(config),
        };
        self.state = ViewState::Rendering;
        tracing::debug!(container = %self.container, buckets = bucket_count, "chart updated");

        Ok(RenderOutcome::Rendered {
            buckets: bucket_count,
        })
    }

    fn ensure_mounted(&mut self) -> S::Handle {
        if let Some(mount) = &self.mount {
            if self.surfaces.borrow().lookup(&self.container).is_some() {
                return mount.handle.clone();
            }
            // The owning view disposed the shared surface; mount a fresh one
            tracing::debug!(container = %self.container, "surface gone, remounting");
            self.release_listener();
        }

        let (handle, owned) = {
            let mut surfaces = self.surfaces.borrow_mut();
            match surfaces.lookup(&self.container) {
                Some(existing) => {
                    tracing::debug!(container = %self.container, "reusing existing surface");
                    (existing, false)
                }
                None => (surfaces.init(&self.container), true),
            }
        };

        let listener = {
            let surfaces = Rc::clone(&self.surfaces);
            let layout = Rc::clone(&self.layout);
            let target = handle.clone();
            self.viewport
                .borrow_mut()
                .add_resize_listener(Box::new(move |size| {
                    let mut surfaces = surfaces.borrow_mut();
                    surfaces.resize(&target, size);
                    relayout(&mut *surfaces, &target, &mut layout.borrow_mut(), size);
                }))
        };

        tracing::info!(container = %self.container, owned, "chart surface mounted");
        self.mount = Some(Mount {
            handle: handle.clone(),
            listener,
            owned,
        });
        self.state = ViewState::Mounted;
        handle
    }

    fn release_listener(&mut self) -> Option<Mount<S::Handle>> {
        let mount = self.mount.take()?;
        if !self
            .viewport
            .borrow_mut()
            .remove_resize_listener(mount.listener)
        {
            tracing::warn!(container = %self.container, "resize listener was already gone");
        }
        Some(mount)
    }

    /// Remove the resize listener and release the surface if this view created it.
    /// Safe to call twice.
    pub fn dispose(&mut self) {
        if self.state == ViewState::Disposed {
            return;
        }
        if let Some(mount) = self.release_listener()
            && mount.owned
        {
            self.surfaces.borrow_mut().dispose(&mount.handle);
        }
        self.layout.borrow_mut().config = None;
        self.state = ViewState::Disposed;
        tracing::debug!(container = %self.container, "chart view disposed");
    }
}

/// Re-push the last config when a resize crosses a breakpoint
fn relayout<S: RenderingSurface>(
    surfaces: &mut S,
    handle: &S::Handle,
    layout: &mut Layout,
    size: Size,
) {
    let breakpoints = Breakpoints::for_width(size.width);
    if breakpoints == layout.breakpoints {
        return;
    }
    let Some(config) = layout.config.as_mut() else {
        return;
    };
    config.apply_breakpoints(breakpoints);
    layout.breakpoints = breakpoints;
    if let Err(e) = surfaces.set_option(handle, config) {
        tracing::warn!(error = %e, "failed to apply responsive layout");
    }
}

impl<S: RenderingSurface + 'static> Drop for ChartView<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
