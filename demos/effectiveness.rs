use log::info;
use rotor_actuation::{Preset, Result};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

const ARM_LENGTH: f64 = 0.25;
const RANK_EPS: f64 = 1e-12;

fn main() -> Result<()> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    for preset in Preset::ALL {
        let body = preset.build(ARM_LENGTH)?;
        let b = body.effectiveness();

        let half_speed: Vec<f64> = body.max_speeds().iter().map(|m| m / 2.).collect();
        let wrench = body.wrench(&half_speed)?;

        info!(
            "{preset}: {} propellers, rank {}, fully actuated: {}",
            body.len(),
            b.rank(RANK_EPS),
            b.is_fully_actuated(RANK_EPS)
        );
        println!("{preset} effectiveness matrix:{}", b.matrix());
        println!(
            "{preset} at half speed: force {:?}, torque {:?}",
            wrench.force.as_slice(),
            wrench.torque.as_slice()
        );
    }

    Ok(())
}
