//! Integration tests for the SR542 actuator adapter.
//!
//! Exercises the full adapter surface against the mock device: settings
//! visibility rules, scaling round trips, bounds clamping, run/stop
//! bookkeeping, and the connection lifecycle.

use daq_driver_sr542::hardware::{ChopperDevice, ControlTarget, MockChopper, Source, SyncEdge};
use daq_driver_sr542::scaling::{AffineScaling, Bounds};
use daq_driver_sr542::settings::SettingValue;
use daq_driver_sr542::{Actuator, ChopperError, PluginConfig, Sr542Actuator};

fn test_config() -> PluginConfig {
    PluginConfig {
        port: Some("COM7".to_string()),
        ..PluginConfig::default()
    }
}

fn adapter_with(config: PluginConfig) -> Sr542Actuator<MockChopper> {
    Sr542Actuator::with_ports(MockChopper::new(), &config, vec!["COM7".to_string()])
}

async fn initialized() -> Sr542Actuator<MockChopper> {
    let mut actuator = adapter_with(test_config());
    let status = actuator.initialize().await.unwrap();
    assert!(status.connected);
    actuator
}

#[tokio::test]
async fn initialize_applies_all_settings_in_order() {
    let actuator = initialized().await;

    let writes: Vec<&str> = actuator
        .device()
        .writes()
        .iter()
        .map(String::as_str)
        .collect();
    // One device write per table entry with a hardware action, in table
    // order; run = false dispatches a stop.
    assert_eq!(
        writes,
        [
            "source",
            "sync_edge",
            "internal_freq",
            "mult_n",
            "mult_m",
            "control_target",
            "stop"
        ]
    );

    assert_eq!(actuator.device().source(), Source::Internal);
    assert_eq!(actuator.device().sync_edge(), SyncEdge::Rise);
    assert_eq!(actuator.device().internal_freq_hz(), 100.0);
    assert_eq!(actuator.device().mult_n(), 1);
    assert_eq!(actuator.device().mult_m(), 1);
    assert_eq!(actuator.device().control_target(), ControlTarget::Outer);
    assert!(!actuator.device().is_running());
}

#[tokio::test]
async fn initialize_with_unreachable_port_reports_failure_without_error() {
    let mut actuator = Sr542Actuator::with_ports(
        MockChopper::unreachable(),
        &test_config(),
        vec!["COM7".to_string()],
    );

    let status = actuator.initialize().await.unwrap();
    assert!(!status.connected);
    assert!(status.info.contains("failed"));
    // No settings were pushed to a device we never reached
    assert!(actuator.device().writes().is_empty());
}

#[tokio::test]
async fn source_toggles_dependent_setting_visibility() {
    let mut actuator = initialized().await;

    actuator
        .commit_setting("source", "external".into())
        .await
        .unwrap();
    assert!(actuator.settings().is_visible("edge"));
    assert!(!actuator.settings().is_visible("internal_freq"));
    assert_eq!(actuator.device().source(), Source::External);

    actuator
        .commit_setting("source", "internal".into())
        .await
        .unwrap();
    assert!(!actuator.settings().is_visible("edge"));
    assert!(actuator.settings().is_visible("internal_freq"));

    for source in ["vco", "line"] {
        actuator.commit_setting("source", source.into()).await.unwrap();
        assert!(!actuator.settings().is_visible("edge"));
        assert!(!actuator.settings().is_visible("internal_freq"));
    }
}

#[tokio::test]
async fn committed_settings_reach_the_device() {
    let mut actuator = initialized().await;

    actuator.commit_setting("edge", "fall".into()).await.unwrap();
    assert_eq!(actuator.device().sync_edge(), SyncEdge::Fall);

    actuator
        .commit_setting("internal_freq", 977.0.into())
        .await
        .unwrap();
    assert_eq!(actuator.device().internal_freq_hz(), 977.0);

    // Integer values are accepted for float settings
    actuator
        .commit_setting("internal_freq", SettingValue::Int(500))
        .await
        .unwrap();
    assert_eq!(actuator.device().internal_freq_hz(), 500.0);

    actuator.commit_setting("n", SettingValue::Int(4)).await.unwrap();
    actuator.commit_setting("m", SettingValue::Int(2)).await.unwrap();
    assert_eq!(actuator.device().mult_n(), 4);
    assert_eq!(actuator.device().mult_m(), 2);

    actuator
        .commit_setting("control", "shaft".into())
        .await
        .unwrap();
    assert_eq!(actuator.device().control_target(), ControlTarget::Shaft);

    actuator
        .commit_setting("run", SettingValue::Bool(true))
        .await
        .unwrap();
    assert!(actuator.device().is_running());
}

#[tokio::test]
async fn invalid_values_are_rejected_before_any_device_write() {
    let mut actuator = initialized().await;
    let writes_before = actuator.device().writes().len();

    let err = actuator
        .commit_setting("source", "sideways".into())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChopperError>(),
        Some(ChopperError::InvalidChoice(_))
    ));

    let err = actuator
        .commit_setting("n", SettingValue::Int(0))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChopperError>(),
        Some(ChopperError::OutOfRange(_))
    ));

    let err = actuator
        .commit_setting("internal_freq", SettingValue::Bool(true))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChopperError>(),
        Some(ChopperError::WrongType(_))
    ));

    let err = actuator
        .commit_setting("gain", 1.0.into())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChopperError>(),
        Some(ChopperError::UnknownSetting(_))
    ));

    assert_eq!(actuator.device().writes().len(), writes_before);
    assert_eq!(actuator.device().source(), Source::Internal);
}

#[tokio::test]
async fn move_abs_then_position_round_trips_through_scaling() {
    let mut config = test_config();
    config.scaling = AffineScaling {
        scale: 2.0,
        offset: 10.0,
    };
    let mut actuator = adapter_with(config);
    actuator.initialize().await.unwrap();

    actuator.move_abs(45.0).await.unwrap();
    // The device sees raw units
    assert_eq!(actuator.device().phase_deg(), 45.0 * 2.0 + 10.0);
    // The host reads back user units
    let position = actuator.position().await.unwrap();
    assert!((position - 45.0).abs() < 1e-9);
}

#[tokio::test]
async fn move_abs_clamps_to_bounds() {
    let mut actuator = initialized().await;

    actuator.move_abs(400.0).await.unwrap();
    assert_eq!(actuator.device().phase_deg(), 360.0);
    assert_eq!(actuator.target(), Some(360.0));

    actuator.move_abs(-20.0).await.unwrap();
    assert_eq!(actuator.device().phase_deg(), 0.0);
}

#[tokio::test]
async fn custom_bounds_are_honored() {
    let mut config = test_config();
    config.bounds = Bounds {
        min: -90.0,
        max: 90.0,
    };
    let mut actuator = adapter_with(config);
    actuator.initialize().await.unwrap();

    actuator.move_abs(120.0).await.unwrap();
    assert_eq!(actuator.device().phase_deg(), 90.0);
    actuator.move_rel(-300.0).await.unwrap();
    assert_eq!(actuator.device().phase_deg(), -90.0);
}

#[tokio::test]
async fn two_relative_moves_equal_one_absolute_move() {
    let mut stepped = initialized().await;
    stepped.move_abs(10.0).await.unwrap();
    stepped.move_rel(7.5).await.unwrap();
    stepped.move_rel(7.5).await.unwrap();

    let mut direct = initialized().await;
    direct.move_abs(10.0).await.unwrap();
    direct.move_abs(10.0 + 2.0 * 7.5).await.unwrap();

    assert_eq!(
        stepped.device().phase_deg(),
        direct.device().phase_deg()
    );
    assert_eq!(stepped.device().phase_deg(), 25.0);
}

#[tokio::test]
async fn relative_move_without_prior_read_queries_the_device() {
    let mut actuator = initialized().await;
    // No position() call yet; the adapter must fetch the phase itself
    actuator.move_rel(5.0).await.unwrap();
    assert_eq!(actuator.device().phase_deg(), 5.0);
}

#[tokio::test]
async fn stop_resets_run_setting() {
    let mut actuator = initialized().await;

    actuator
        .commit_setting("run", SettingValue::Bool(true))
        .await
        .unwrap();
    assert!(actuator.device().is_running());
    assert!(actuator.settings().flag("run").unwrap());

    actuator.stop().await.unwrap();
    assert!(!actuator.device().is_running());
    assert!(!actuator.settings().flag("run").unwrap());

    // Stopping when already stopped still leaves run = false
    actuator.stop().await.unwrap();
    assert!(!actuator.settings().flag("run").unwrap());
}

#[tokio::test]
async fn move_home_is_a_no_op() {
    let mut actuator = initialized().await;
    actuator.move_abs(30.0).await.unwrap();
    actuator.move_home().await.unwrap();
    assert_eq!(actuator.device().phase_deg(), 30.0);
}

#[tokio::test]
async fn close_releases_the_device_and_is_not_idempotent() {
    let mut actuator = initialized().await;

    actuator.close().await.unwrap();
    assert!(!actuator.device().is_connected());

    let err = actuator.close().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChopperError>(),
        Some(ChopperError::NotConnected)
    ));
}

#[tokio::test]
async fn moves_after_close_propagate_device_errors() {
    let mut actuator = initialized().await;
    actuator.close().await.unwrap();
    assert!(actuator.move_abs(10.0).await.is_err());
    assert!(actuator.position().await.is_err());
}
