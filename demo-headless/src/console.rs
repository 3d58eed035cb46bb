//! Text rendering of a threat prediction

use wildfire_threat_core::ThreatPrediction;

const RULE_WIDTH: usize = 60;

/// Format with thousands separators, rounded to whole units
fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

pub fn print_prediction(prediction: &ThreatPrediction, window_area_ha: f64) {
    let features = &prediction.features;
    let fire = &prediction.fire_behavior;
    let threat = &prediction.threat_assessment;
    let rule = "=".repeat(RULE_WIDTH);

    println!("{rule}");
    println!("WILDFIRE THREAT ASSESSMENT");
    println!("{rule}");
    println!("Overall Threat: {}", threat.threat_level);
    println!("Expected Threat Score: {:.3}", threat.expected_threat_score);
    println!();

    println!("ENVIRONMENTAL CONDITIONS:");
    println!("   Temperature: {:.1}", features.temp_c);
    println!("   Humidity: {:.1}", features.rel_humidity_pct);
    println!("   Wind Speed: {:.1}", features.wind_speed_ms);
    println!("   Precipitation (24h): {:.1}", features.precip_mm);
    println!("   VPD: {:.3} kPa", features.vpd_kpa);
    println!("   Lightning (24h): {} strikes", features.lightning_strikes_24h);
    println!();

    println!("VEGETATION & TERRAIN:");
    println!("   NDVI: {:.3}", features.ndvi);
    println!("   NDMI: {:.3}", features.ndmi);
    println!("   Elevation: {:.0} m", *features.elevation_m);
    println!("   Slope: {:.1}°", *features.slope_deg);
    println!("   Aspect: {:.1}°", *features.aspect_deg);
    println!();

    if let Some(risk) = &prediction.ignition_risk {
        println!("IGNITION RISK:");
        println!("   Fire Risk: {:.2}%", risk.fire_risk_percentage);
        println!("   Risk Level: {}", risk.risk_level);
        println!("   Fire Expected: {}", if risk.fire_expected { "yes" } else { "no" });
        println!();
    }

    println!("FIRE BEHAVIOR PREDICTION:");
    println!("   Rate of Spread: {:.3} m/min", fire.ros_base_m_per_min);
    println!("   Effective ROS: {:.3} m/min", fire.ros_effective_m_per_min);
    println!(
        "   Terrain: slope x{:.2}, aspect x{:.2}",
        fire.slope_multiplier, fire.aspect_factor
    );
    println!(
        "   Fuel: {:.3} kg/m² at {:.1}% moisture",
        fire.fuel_load_kg_m2, fire.fuel_moisture_pct
    );
    println!("   Flame Length: {:.2} m", fire.flame_length_m);
    println!("   Fire Intensity: {:.0} kW/m", fire.intensity_kw_per_m);
    println!("   Severity: {}", fire.severity_class);
    println!();

    println!("CROWN FIRE ASSESSMENT:");
    println!("   Crown Fire Score: {:.1}/100", fire.crown_fire_score);
    println!("   Crown Fire Class: {}", fire.crown_fire_class);
    println!();

    println!("SPREAD CHARACTERISTICS:");
    println!("   Spotting Distance: {:.2} km", fire.spotting_distance_km);
    match fire.time_to_burn_hours {
        Some(hours) => println!("   Time to burn {window_area_ha:.0} ha: {hours:.1} hours"),
        None => println!("   Time to burn {window_area_ha:.0} ha: fire not spreading"),
    }
    println!("   Containment: {}", fire.containment_difficulty);
    println!();

    println!("IMPACT ESTIMATES:");
    println!(
        "   Damage ({window_area_ha:.0} ha): Rs {}",
        group_thousands(fire.damage_estimate_rs)
    );
    println!();

    if !threat.key_concerns.is_empty() {
        println!("KEY CONCERNS:");
        for concern in &threat.key_concerns {
            println!("   • {concern}");
        }
        println!();
    }

    println!("SUMMARY: {}", threat.summary);
    println!("{rule}");
}
