//! The broadcast registry keeping chart windows synchronized.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::DashboardWidget;

/// Ordered collection of every live widget on the page.
///
/// Created once per page session and injected into widget constructors;
/// registration is append-only and entries live until the session ends.
/// A broadcast walks entries in registration order, switching each to the
/// new period and firing its render without waiting; completions land in
/// whatever order the backend answers.
pub struct WidgetRegistry {
    widgets: Mutex<Vec<Arc<dyn DashboardWidget>>>,
    tasks: Handle,
}

impl WidgetRegistry {
    /// Create an empty registry whose renders run on `tasks`.
    pub fn new(tasks: Handle) -> Arc<Self> {
        Arc::new(Self {
            widgets: Mutex::new(Vec::new()),
            tasks,
        })
    }

    /// Append a widget. Order is the broadcast order.
    pub fn register(&self, widget: Arc<dyn DashboardWidget>) {
        self.widgets.lock().push(widget);
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.widgets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.lock().is_empty()
    }

    /// Switch every registered widget to `token` and start their renders.
    ///
    /// Each widget gets its loading placeholder and new period immediately,
    /// in registration order; renders run concurrently and are not awaited.
    /// A failed render logs a warning and leaves the placeholder showing.
    pub fn broadcast(&self, token: &str) {
        let widgets: Vec<Arc<dyn DashboardWidget>> = self.widgets.lock().clone();
        debug!(token, widgets = widgets.len(), "broadcast");

        for widget in widgets {
            widget.show_loading();
            widget.set_period(token);
            self.tasks.spawn(async move {
                if let Err(err) = widget.render().await {
                    warn!(container = widget.container(), error = %err, "render failed");
                }
            });
        }
    }
}
