#![cfg(target_arch = "wasm32")]

use leptos::{SignalWith, create_rw_signal};
use oracle_price_feed_wasm::application::{FeedTimings, PriceFeedService, Sleeper};
use oracle_price_feed_wasm::domain::{
    errors::AppError,
    feed::{Headline, PriceFeedState},
    logging::{LogComponent, LogEntry, LogLevel, Logger},
    market_data::{Instrument, SampleSlot},
};
use oracle_price_feed_wasm::infrastructure::{
    BrowserTimer, ConsoleLogger, FeedConfig, MathRandomJitter, MockOracleFeed,
    config::{CONFIG_GLOBAL, load_config, load_config_or_default, read_page_config},
    rendering::{CHART_HEIGHT, CHART_WIDTH, LineChartRenderer},
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
async fn signal_store_runs_the_full_flow() {
    let state = create_rw_signal(PriceFeedState::new());
    let service = PriceFeedService::new(
        state,
        Rc::new(MockOracleFeed::default()),
        Rc::new(RefCell::new(MathRandomJitter)),
        Rc::new(BrowserTimer),
    )
    .with_timings(FeedTimings {
        startup_delay: Duration::from_millis(1),
        selection_delay: Duration::from_millis(5),
    });

    service.bootstrap().await.unwrap();
    assert_eq!(state.with(PriceFeedState::headline).text(), "$1,234.56");

    assert!(service.change_selection(Instrument::from("NGN/USDC")).await.unwrap());
    assert_eq!(state.with(PriceFeedState::headline), Headline::Price("$1,120.75".to_string()));
    state.with(|s| {
        let series = s.chart().unwrap();
        assert_eq!(series.len(), SampleSlot::COUNT);
        assert!(series.points().iter().all(|p| (p.value.value() - 1120.75).abs() <= 5.0));
    });
}

#[wasm_bindgen_test]
async fn renderer_draws_series_on_canvas() {
    let state = Rc::new(RefCell::new(PriceFeedState::new()));
    let service = PriceFeedService::new(
        state.clone(),
        Rc::new(MockOracleFeed::default()),
        Rc::new(RefCell::new(MathRandomJitter)),
        Rc::new(BrowserTimer),
    )
    .with_timings(FeedTimings {
        startup_delay: Duration::from_millis(0),
        selection_delay: Duration::from_millis(0),
    });
    service.bootstrap().await.unwrap();

    let canvas = canvas();
    let blank = canvas.to_data_url().unwrap();
    let series = state.borrow().chart().cloned().unwrap();
    LineChartRenderer::default().draw(&canvas, &series).unwrap();

    assert_eq!(canvas.width(), CHART_WIDTH);
    assert_eq!(canvas.height(), CHART_HEIGHT);
    assert_ne!(canvas.to_data_url().unwrap(), blank);
}

#[wasm_bindgen_test]
fn console_logger_writes_without_panicking() {
    let logger = ConsoleLogger::new_development();
    logger.log(LogEntry::new(LogLevel::Info, LogComponent::Presentation("test"), "hello"));
    logger.log(LogEntry::new_with_metadata(
        LogLevel::Error,
        LogComponent::Infrastructure("test"),
        "failed",
        "detail",
    ));
    assert!(!logger.accepts(LogLevel::Trace));
}

fn set_page_config(value: &JsValue) {
    js_sys::Reflect::set(&js_sys::global(), &JsValue::from_str(CONFIG_GLOBAL), value).unwrap();
}

fn clear_page_config() {
    js_sys::Reflect::delete_property(&js_sys::global(), &JsValue::from_str(CONFIG_GLOBAL)).unwrap();
}

#[wasm_bindgen_test]
fn page_config_global_is_read_as_string_or_object() {
    clear_page_config();
    assert_eq!(read_page_config(), None);
    assert_eq!(load_config().unwrap(), FeedConfig::default());

    set_page_config(&JsValue::from_str(r#"{"selection_delay_ms": 50}"#));
    let from_string = load_config().unwrap();
    assert_eq!(from_string.selection_delay_ms, 50);
    assert_eq!(from_string.startup_delay_ms, 10);

    let object = js_sys::JSON::parse(r#"{"title": "Staging oracle", "pairs": [{"symbol": "GHS/USD", "price": 15.2}]}"#).unwrap();
    set_page_config(&object);
    let from_object = load_config().unwrap();
    assert_eq!(from_object.title, "Staging oracle");
    assert_eq!(from_object.pairs.len(), 1);
    assert_eq!(from_object.pairs[0].symbol, "GHS/USD");

    set_page_config(&JsValue::from_str("{not json"));
    assert!(matches!(load_config(), Err(AppError::Config(_))));
    let (fallback, reason) = load_config_or_default();
    assert_eq!(fallback, FeedConfig::default());
    assert!(matches!(reason, Some(AppError::Config(_))));

    clear_page_config();
}

#[wasm_bindgen_test]
fn oversized_delay_does_not_abort_the_timer() {
    // gloo-timers converts the delay to u32 when the future is created.
    let pending = BrowserTimer.sleep(Duration::from_secs(u64::MAX));
    drop(pending);
    let pending = BrowserTimer.sleep(Duration::from_millis(u32::MAX as u64 + 1));
    drop(pending);
}
