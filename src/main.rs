use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    widgets::Clear,
    Terminal,
};
use tokio::runtime::Handle;
use tracing::warn;

use qosboard::app::{App, Panel};
use qosboard::widget::{
    ChartKind, ChartWidget, CompositeFunnelView, GaugeKind, GaugeWidget, WidgetContext,
    WidgetRegistry,
};
use qosboard::{
    events, ui, FunnelScope, HttpQueryClient, LocalClock, Settings,
};
use qosboard::ui::TuiHost;
use qosboard::widget::MODAL_TARGET;

#[derive(Parser, Debug)]
#[command(name = "qosboard")]
#[command(about = "Terminal dashboard for monitoring QoS telemetry")]
struct Args {
    /// Backend base URL (e.g. http://localhost:8000)
    #[arg(short, long)]
    backend: Option<String>,

    /// Site whose telemetry to show
    #[arg(short, long)]
    site: Option<String>,

    /// Initial period token (15m, 1h, 6h, 12h, 24h, 7d, 1m, 3m, 1y)
    #[arg(short, long)]
    period: Option<String>,

    /// Path to a settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Auto-refresh interval in seconds (0 disables auto-refresh)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Funnel the traffic of all sites instead of direct children only
    #[arg(long)]
    all_sites: bool,

    /// Write logs to this file (the terminal itself is owned by the TUI)
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(backend) = args.backend {
        settings.backend = backend;
    }
    if let Some(site) = args.site {
        settings.site = site;
    }
    if let Some(period) = args.period {
        settings.period = period;
    }
    if let Some(refresh) = args.refresh {
        settings.refresh = refresh;
    }
    if args.all_sites {
        settings.funnel_all_sites = true;
    }

    if let Some(ref path) = args.log {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    // Widgets spawn their renders on this runtime; the main thread stays on
    // the terminal loop.
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let mut client = HttpQueryClient::builder().endpoint(&settings.backend);
    if let Some(timeout) = settings.timeout {
        client = client.timeout(Duration::from_secs(timeout));
    }

    let host = TuiHost::new();
    let ctx = WidgetContext {
        host: host.clone(),
        source: Arc::new(client.build()?),
        clock: LocalClock::system(),
        tasks: Handle::current(),
    };
    let registry = WidgetRegistry::new(Handle::current());

    let site = settings.site.clone();
    let period = settings.period.as_str();
    let _latency = ChartWidget::new(
        ctx.clone(),
        "latency",
        site.clone(),
        ChartKind::Latency,
        period,
        &registry,
        true,
    );
    let _bandwidth = ChartWidget::new(
        ctx.clone(),
        "bandwidth",
        site.clone(),
        ChartKind::Bandwidth,
        period,
        &registry,
        true,
    );
    let _drops = ChartWidget::new(
        ctx.clone(),
        "drops",
        site.clone(),
        ChartKind::Drops,
        period,
        &registry,
        true,
    );
    let scope = if settings.funnel_all_sites {
        FunnelScope::AllSites
    } else {
        FunnelScope::DirectChildren
    };
    let _funnel = CompositeFunnelView::new(
        ctx.clone(),
        "funnel_down",
        "funnel_up",
        site.clone(),
        period,
        scope,
        &registry,
    );

    let gauges = [
        GaugeWidget::new(ctx.clone(), "cpu", GaugeKind::Cpu),
        GaugeWidget::new(ctx.clone(), "ram", GaugeKind::Ram),
        GaugeWidget::new(ctx, "swap", GaugeKind::Swap),
    ];

    // Kick off the initial round of queries.
    registry.broadcast(&settings.period);
    for gauge in &gauges {
        let gauge = gauge.clone();
        rt.spawn(async move {
            if let Err(err) = gauge.render().await {
                warn!(container = %gauge.container(), error = %err, "gauge render failed");
            }
        });
    }

    let panels = vec![
        Panel::chart("latency", "Latency"),
        Panel::chart("bandwidth", "Bandwidth"),
        Panel::chart("drops", "Drops"),
        Panel::chart("funnel_down", "Funnel ▼"),
        Panel::chart("funnel_up", "Funnel ▲"),
        Panel::gauge("cpu", "CPU"),
        Panel::gauge("ram", "RAM"),
        Panel::gauge("swap", "Swap"),
    ];

    let mut app = App::new(host, registry, panels, settings.site, settings.period);
    run_tui(&mut app, Duration::from_secs(settings.refresh))
}

/// Run the TUI main loop until the app quits.
fn run_tui(app: &mut App, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 80;
    const MIN_HEIGHT: u16 = 20;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                frame.render_widget(paragraph, too_small_notice_area(area));
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Period bar
                Constraint::Min(8),    // Panels
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_period_bar(frame, app, chunks[1]);
            render_panels(frame, app, chunks[2]);
            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.modal_open {
                render_modal(frame, app, area);
            }
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Periodic re-query of every registered widget
        if !refresh_interval.is_zero() && last_refresh.elapsed() >= refresh_interval {
            app.refresh();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Centered strip for the too-small notice, clamped to the frame so a tiny
/// resize cannot place it outside the buffer.
fn too_small_notice_area(area: Rect) -> Rect {
    let height = area.height.min(5);
    let y = area.y + (area.height - height) / 2;
    Rect::new(area.x, y, area.width, height)
}

/// Lay the panels out in three rows: time charts, funnel pair, gauges.
fn render_panels(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(40),
        Constraint::Min(5),
    ])
    .split(area);

    let top = Layout::horizontal([
        Constraint::Percentage(34),
        Constraint::Percentage(33),
        Constraint::Percentage(33),
    ])
    .split(rows[0]);
    let middle =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(rows[1]);
    let bottom = Layout::horizontal([
        Constraint::Percentage(34),
        Constraint::Percentage(33),
        Constraint::Percentage(33),
    ])
    .split(rows[2]);

    let rects = [top[0], top[1], top[2], middle[0], middle[1], bottom[0], bottom[1], bottom[2]];

    for (index, (panel, rect)) in app.panels.iter().zip(rects.iter()).enumerate() {
        let content = app.host.content(&panel.target);
        ui::chart_view::render(
            frame,
            *rect,
            &panel.title,
            content.as_ref(),
            &app.theme,
            index == app.focused,
        );
    }
}

/// Render the zoom modal as a centered overlay showing the shared modal
/// target.
fn render_modal(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(8).max(20);
    let height = area.height.saturating_sub(4).max(10);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let modal_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, modal_area);
    let content = app.host.content(MODAL_TARGET);
    ui::chart_view::render(frame, modal_area, "Zoom", content.as_ref(), &app.theme, true);
}
