use std::process::ExitCode;

use anyhow::Context;
use isomap_core::{load_style, AppConfig, LatLng, PolygonStyle};
use isomap_render::defaults::demo_ring;
use isomap_render::{render, FetchStatus, MapSession, PolygonSource, RenderTarget, RingUpdate};
use isomap_routing::RoutingClient;

use crate::{Format, OutputArgs};

/// Fetches the isochrone and prints the scene for whichever ring the
/// session publishes: the isochrone on success, the fallback otherwise.
pub(crate) async fn run_isochrone(
    config: &AppConfig,
    origin: Option<LatLng>,
    budget_secs: Option<u32>,
    output: &OutputArgs,
) -> anyhow::Result<ExitCode> {
    let origin = origin.unwrap_or(config.default_origin);
    let budget_secs = budget_secs.unwrap_or(config.default_time_budget_secs);
    let style = resolve_style(config)?;

    let client = RoutingClient::from_app_config(config)?;
    let session = MapSession::new(client, demo_ring()?);

    let mut updates = session.subscribe();
    let generation = session.trigger(origin, budget_secs);
    let update = updates
        .wait_for(|u| u.generation == generation)
        .await
        .context("map session closed before publishing a ring")?
        .clone();

    print_scene(config, &update, output, &style)?;

    match session.status() {
        FetchStatus::Success(_) => Ok(ExitCode::SUCCESS),
        FetchStatus::Failed(reason) => {
            tracing::error!(%reason, "isochrone unavailable; printed fallback polygon");
            Ok(ExitCode::FAILURE)
        }
        other => {
            tracing::error!(status = other.label(), "fetch did not settle");
            Ok(ExitCode::FAILURE)
        }
    }
}

pub(crate) fn run_demo(config: &AppConfig, output: &OutputArgs) -> anyhow::Result<ExitCode> {
    let style = resolve_style(config)?;
    let update = RingUpdate {
        generation: 0,
        ring: demo_ring()?,
        source: PolygonSource::Default,
    };
    print_scene(config, &update, output, &style)?;
    Ok(ExitCode::SUCCESS)
}

fn resolve_style(config: &AppConfig) -> anyhow::Result<PolygonStyle> {
    let base = PolygonStyle::default();
    match &config.style_path {
        Some(path) => {
            let overrides = load_style(path)?;
            tracing::debug!(path = %path.display(), "applied style overrides");
            Ok(base.with_overrides(&overrides))
        }
        None => Ok(base),
    }
}

fn print_scene(
    config: &AppConfig,
    update: &RingUpdate,
    output: &OutputArgs,
    style: &PolygonStyle,
) -> anyhow::Result<()> {
    let target = match output.format {
        Format::Geojson => RenderTarget::GeoJson,
        Format::Path => RenderTarget::LatLngPath,
    };
    let scene = render(
        update,
        target,
        style,
        config.maps_api_key.as_deref(),
        output.width,
        output.height,
    );
    let json = if output.pretty {
        serde_json::to_string_pretty(&scene)?
    } else {
        serde_json::to_string(&scene)?
    };
    println!("{json}");
    Ok(())
}
