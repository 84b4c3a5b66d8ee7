//! Garden Heat-Pump Example
//!
//! Walks a heat pump heard from a neighbour's window through each mitigation
//! device and prints how far the level drops.

use noisefall::{
    compute_curve, ClassificationPolicy, DeviceCatalog, DeviceId, ModelError, ScenarioParameters,
    Thresholds,
};

fn main() -> Result<(), ModelError> {
    println!("Running garden heat-pump scenario...\n");

    let catalog = DeviceCatalog::standard();
    let thresholds = Thresholds::default();
    let base = ScenarioParameters::new(
        62.0, // source level [dB]
        8.5,  // distance to the neighbour's window [m]
        [],
    )?;

    println!("Configuration:");
    println!("  Source level: {} dB", base.source_level_db());
    println!("  Listener distance: {} m", base.target_distance_m());
    println!(
        "  Thresholds: audible {} dB, ceiling {} dB",
        thresholds.audible_db(),
        thresholds.regulatory_ceiling_db()
    );
    println!();

    println!("LEVEL BY DEVICE");
    println!("===============");
    for device in DeviceId::ALL {
        let params = base.with_device(device);
        let result = compute_curve(&params, &catalog);
        let band = thresholds.classify(result.level_at_target_db, ClassificationPolicy::ThreeBand);
        println!(
            "  {:<26} {:>5.1} dB  ({})",
            device.label(),
            result.level_at_target_db,
            band
        );
    }

    let everything = ScenarioParameters::new(
        base.source_level_db(),
        base.target_distance_m(),
        DeviceId::ALL,
    )?;
    let stacked = compute_curve(&everything, &catalog);
    println!("\nAll devices stacked:");
    println!("  Device attenuation: {:.1} dB", stacked.device_attenuation_db);
    println!("  Total attenuation:  {:.1} dB", stacked.total_attenuation_db);
    println!("  Level at listener:  {:.1} dB", stacked.level_at_target_db);

    println!("\nDone!");
    Ok(())
}
