//! Composite funnel view: a down/up chart pair sharing one fetch.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::query::{FunnelScope, QueryError};

use super::{ChartKind, ChartWidget, DashboardWidget, WidgetContext, WidgetRegistry};

/// Two stacked-area funnel charts (download and upload) driven by a single
/// per-child-site history payload.
///
/// The sub-widgets never query on their own: the composite fetches once per
/// render, attaches the payload to both, then lets each draw. Only the
/// composite registers for broadcasts, so a period change reaches the pair
/// exactly once.
pub struct CompositeFunnelView {
    container: String,
    node: String,
    scope: FunnelScope,
    down: Arc<ChartWidget>,
    up: Arc<ChartWidget>,
    ctx: WidgetContext,
}

impl CompositeFunnelView {
    /// Build the pair and register the composite.
    pub fn new(
        ctx: WidgetContext,
        down_container: impl Into<String>,
        up_container: impl Into<String>,
        node: impl Into<String>,
        period: &str,
        scope: FunnelScope,
        registry: &Arc<WidgetRegistry>,
    ) -> Arc<Self> {
        let down_container = down_container.into();
        let node = node.into();

        let down = ChartWidget::new(
            ctx.clone(),
            down_container.clone(),
            node.clone(),
            ChartKind::FunnelDown,
            period,
            registry,
            false,
        );
        let up = ChartWidget::new(
            ctx.clone(),
            up_container,
            node.clone(),
            ChartKind::FunnelUp,
            period,
            registry,
            false,
        );

        let view = Arc::new(Self {
            container: down_container,
            node,
            scope,
            down,
            up,
            ctx,
        });
        registry.register(view.clone());
        view
    }

    /// The download half of the pair.
    pub fn down_widget(&self) -> &Arc<ChartWidget> {
        &self.down
    }

    /// The upload half of the pair.
    pub fn up_widget(&self) -> &Arc<ChartWidget> {
        &self.up
    }
}

#[async_trait]
impl DashboardWidget for CompositeFunnelView {
    fn container(&self) -> &str {
        &self.container
    }

    fn show_loading(&self) {
        self.down.show_loading();
        self.up.show_loading();
    }

    fn set_period(&self, token: &str) {
        self.down.set_period(token);
        self.up.set_period(token);
    }

    async fn render(&self) -> Result<(), QueryError> {
        // One fetch fanned out to both halves. The down widget's range is
        // authoritative; set_period keeps both in step anyway.
        let range = self.down.current_range();
        debug!(node = %self.node, range = %range.range_param(), "funnel fetch");

        let history = self
            .ctx
            .source
            .site_funnel(&self.node, &range, self.scope)
            .await?;

        self.down.attach_history(history.clone());
        self.up.attach_history(history);
        self.down.render().await?;
        self.up.render().await?;
        Ok(())
    }
}
