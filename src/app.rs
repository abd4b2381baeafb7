use leptos::html::Canvas;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    application::PriceFeedService,
    domain::{
        feed::{FeedStats, Headline, LOADING_CHART_TEXT, LOADING_TEXT, PriceFeedState, summary_cards},
        logging::LogComponent,
        market_data::Instrument,
    },
    infrastructure::{
        config::config,
        rendering::{CHART_HEIGHT, CHART_WIDTH, LineChartRenderer},
        BrowserTimer, MathRandomJitter, MockOracleFeed,
    },
};
use crate::{log_debug, log_error};

/// Service wired to the page's own signal
pub type PageService = PriceFeedService<RwSignal<PriceFeedState>>;

const STYLES: &str = r#"
.oracle-app {
    font-family: 'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif;
    min-height: 100vh;
    color: white;
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    padding: 16px;
    position: relative;
    overflow: hidden;
}

.backdrop {
    position: fixed;
    inset: 0;
    z-index: -20;
    background-size: cover;
    background-position: center;
}

.backdrop::after {
    content: "";
    position: absolute;
    inset: 0;
    background: rgba(0, 0, 0, 0.6);
}

.panel {
    max-width: 42rem;
    width: 100%;
    padding: 24px;
    border-radius: 16px;
    backdrop-filter: blur(4px);
    background: rgba(255, 255, 255, 0.01);
    border: 1px solid rgba(255, 255, 255, 0.1);
    box-shadow: 0 25px 50px rgba(0, 0, 0, 0.25);
}

.title {
    font-size: 30px;
    font-weight: 700;
    text-align: center;
    margin-bottom: 12px;
    background: linear-gradient(to right, #ffffff, #d4d4d4);
    -webkit-background-clip: text;
    background-clip: text;
    color: transparent;
}

.description {
    font-size: 14px;
    color: #d4d4d4;
    text-align: center;
    margin-bottom: 20px;
}

.controls {
    display: flex;
    gap: 16px;
    align-items: center;
    justify-content: space-between;
    margin-bottom: 24px;
}

.pair-selector {
    display: flex;
    gap: 16px;
}

.glass {
    backdrop-filter: blur(12px);
    background: rgba(255, 255, 255, 0.1);
    border: 1px solid rgba(255, 255, 255, 0.15);
    border-radius: 12px;
    box-shadow: 0 10px 15px rgba(0, 0, 0, 0.2);
}

.pair-button {
    color: white;
    font-weight: 600;
    padding: 8px 16px;
    cursor: pointer;
    transition: all 0.15s;
}

.pair-button:hover {
    background: rgba(255, 255, 255, 0.15);
}

.pair-button.selected {
    background: rgba(255, 255, 255, 0.2);
    color: #93c5fd;
    border-color: #60a5fa;
}

.pair-button:disabled {
    cursor: wait;
}

.badge {
    display: flex;
    align-items: center;
    gap: 4px;
    padding: 4px 8px;
    font-size: 12px;
    color: #86efac;
}

.badge-dot {
    width: 8px;
    height: 8px;
    border-radius: 50%;
    background: #4ade80;
}

.headline {
    display: flex;
    flex-direction: column;
    align-items: center;
    margin-bottom: 24px;
}

.headline-price {
    font-size: 36px;
    font-weight: 800;
    padding: 16px 24px;
    margin-bottom: 8px;
}

.chart-slot {
    position: relative;
    width: 100%;
    height: 120px;
    margin-top: 12px;
}

.chart-placeholder {
    display: flex;
    align-items: center;
    justify-content: center;
    height: 100%;
}

.chart-tooltip {
    position: absolute;
    top: 0;
    right: 0;
    background: rgba(0, 0, 0, 0.8);
    border: 1px solid rgba(255, 255, 255, 0.15);
    border-radius: 8px;
    font-size: 12px;
    padding: 4px 8px;
    pointer-events: none;
}

.account-note {
    font-size: 12px;
    color: #a3a3a3;
    text-align: center;
    margin-top: 8px;
}

.mono {
    font-family: 'Courier New', monospace;
}

.summary-grid {
    display: grid;
    grid-template-columns: repeat(3, 1fr);
    gap: 16px;
    margin-top: 24px;
}

.summary-card {
    padding: 16px;
}

.summary-card h3 {
    font-size: 14px;
    font-weight: 600;
    color: #d4d4d4;
    margin: 0 0 4px 0;
}

.card-value {
    font-size: 24px;
    font-weight: 700;
}

.muted {
    color: #a3a3a3;
}

.pulse {
    animation: pulse 2s cubic-bezier(0.4, 0, 0.6, 1) infinite;
}

@keyframes pulse {
    50% { opacity: 0.5; }
}

@media (max-width: 768px) {
    .controls { flex-direction: column; }
    .summary-grid { grid-template-columns: 1fr; }
}
"#;

/// Oracle price feed page
#[component]
pub fn App() -> impl IntoView {
    let page_config = config();
    let state = create_rw_signal(PriceFeedState::new());
    let service: PageService = PriceFeedService::new(
        state,
        Rc::new(MockOracleFeed::from_config(page_config)),
        Rc::new(RefCell::new(MathRandomJitter)),
        Rc::new(BrowserTimer),
    )
    .with_timings(page_config.timings())
    .with_generator(page_config.generator());

    {
        let service = service.clone();
        spawn_local(async move {
            // Failures are logged by the service; the page keeps its placeholders.
            let _ = service.bootstrap().await;
        });
    }

    let backdrop_style = format!("background-image: url('{}');", page_config.background_image);

    view! {
        <style>{STYLES}</style>
        <main class="oracle-app">
            <div class="backdrop" style=backdrop_style></div>
            <div class="panel">
                <h1 class="title">{page_config.title.clone()}</h1>
                <p class="description">{page_config.description.clone()}</p>
                <div class="controls">
                    <PairSelector state=state service=service />
                    <ConnectionBadge />
                </div>
                <div class="headline">
                    <HeadlinePrice state=state />
                    <TrendChart state=state />
                    <div class="account-note">
                        "This is processing directly from the associated onchain account: "
                        <span class="mono">{page_config.account_label.clone()}</span>
                    </div>
                </div>
                <SummaryCards state=state stats=page_config.stats() />
            </div>
        </main>
    }
}

/// One button per instrument, disabled while loading
#[component]
fn PairSelector(state: RwSignal<PriceFeedState>, service: PageService) -> impl IntoView {
    let instruments = move || state.with(|s| s.instruments().to_vec());
    let is_loading = move || state.with(PriceFeedState::is_loading);

    view! {
        <div class="pair-selector">
            <For
                each=instruments
                key=|pair| pair.clone()
                children=move |pair: Instrument| {
                    let service = service.clone();
                    let label = pair.to_string();
                    let is_selected = {
                        let pair = pair.clone();
                        move || state.with(|s| s.selected() == Some(&pair))
                    };
                    view! {
                        <button
                            class="glass pair-button"
                            class:selected=is_selected
                            disabled=is_loading
                            on:click=move |_| {
                                let service = service.clone();
                                let pair = pair.clone();
                                spawn_local(async move {
                                    let _ = service.change_selection(pair).await;
                                });
                            }
                        >
                            {label}
                        </button>
                    }
                }
            />
        </div>
    }
}

#[component]
fn ConnectionBadge() -> impl IntoView {
    view! {
        <span class="glass badge">
            <span class="badge-dot pulse"></span>
            "Connected"
        </span>
    }
}

fn headline_view(headline: Headline) -> View {
    match headline {
        Headline::Loading => view! { <span class="pulse muted">{LOADING_TEXT}</span> }.into_view(),
        Headline::Price(text) => text.into_view(),
    }
}

#[component]
fn HeadlinePrice(state: RwSignal<PriceFeedState>) -> impl IntoView {
    view! {
        <div class="glass headline-price">
            {move || headline_view(state.with(PriceFeedState::headline))}
        </div>
    }
}

/// Trend line canvas with a loading placeholder and a hover readout
#[component]
fn TrendChart(state: RwSignal<PriceFeedState>) -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    let renderer = LineChartRenderer::default();
    let series = create_memo(move |_| state.with(|s| s.chart().cloned()));
    let (hover, set_hover) = create_signal::<Option<String>>(None);

    create_effect(move |_| {
        let Some(series) = series.get() else {
            return;
        };
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        if let Err(e) = renderer.draw(&canvas, &series) {
            log_error!(LogComponent::Presentation("TrendChart"), "{}", e);
        }
    });

    let on_move = move |ev: web_sys::MouseEvent| {
        let readout = series.with_untracked(|current| {
            let current = current.as_ref()?;
            let plot = renderer.layout(current)?;
            let point = current.points().get(plot.nearest_index(ev.offset_x() as f64)?)?;
            Some(format!("{}: {}", point.slot.label(), point.value.format_usd()))
        });
        set_hover.set(readout);
    };

    view! {
        <div class="chart-slot">
            <Show
                when=move || series.with(Option::is_some)
                fallback=|| view! { <div class="chart-placeholder pulse muted">{LOADING_CHART_TEXT}</div> }
            >
                <canvas
                    node_ref=canvas_ref
                    width=CHART_WIDTH.to_string()
                    height=CHART_HEIGHT.to_string()
                    on:mousemove=on_move
                    on:mouseleave=move |_| set_hover.set(None)
                />
                <div
                    class="chart-tooltip"
                    style:display=move || if hover.with(Option::is_some) { "block" } else { "none" }
                >
                    {move || hover.get().unwrap_or_default()}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn SummaryCards(state: RwSignal<PriceFeedState>, stats: FeedStats) -> impl IntoView {
    log_debug!(LogComponent::Presentation("SummaryCards"), "Stats {:?}", stats);
    view! {
        <div class="summary-grid">
            {move || {
                state
                    .with(|s| summary_cards(s, stats))
                    .into_iter()
                    .map(|card| {
                        view! {
                            <div class="glass summary-card">
                                <h3>{card.title}</h3>
                                <div class="card-value" class:pulse=card.loading class:muted=card.loading>
                                    {card.value}
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
