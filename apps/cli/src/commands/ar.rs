//! AR model lookup and session tracking.

use anyhow::{bail, Result};
use bistro_core::ar::{ArMode, ArSessionDraft, DeviceType};
use bistro_store::RestaurantStore;

pub fn model(store: &RestaurantStore, item_id: &str) -> Result<()> {
    let Some(model) = store.ar_model(item_id) else {
        bail!("No AR model for item '{}'", item_id);
    };

    println!("{}", model.id);
    println!("  glb:       {}", model.glb_url);
    println!("  usdz:      {}", model.usdz_url);
    if !model.thumbnail_url.is_empty() {
        println!("  thumbnail: {}", model.thumbnail_url);
    }
    println!("  size:      {} bytes (v{})", model.file_size, model.version);
    Ok(())
}

pub fn track(
    store: &RestaurantStore,
    item_id: String,
    device: Option<DeviceType>,
    mode: Option<ArMode>,
    success: bool,
    interactions: Option<u32>,
) -> Result<()> {
    let draft = ArSessionDraft {
        device_type: device,
        ar_mode: mode,
        success: Some(success),
        interaction_count: interactions,
        ..ArSessionDraft::for_item(item_id)
    };
    store.track_ar_usage(draft);

    let sessions = store.ar_sessions();
    if let Some(session) = sessions.last() {
        println!(
            "Recorded {} ({} on {}, {} sessions logged)",
            session.id,
            session.ar_mode,
            session.device_type,
            sessions.len()
        );
    }
    Ok(())
}
