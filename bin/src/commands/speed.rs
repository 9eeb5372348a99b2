use anyhow::{bail, Result};
use autoscroll::SpeedAlgorithm;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedTable {
    pub algorithm: SpeedAlgorithm,
    pub from: i32,
    pub to: i32,
    pub step: u32,
    pub display_scale: f32,
}

impl SpeedTable {
    /// `(displacement, pixels per second)` rows, `from` to `to` inclusive.
    pub fn rows(&self) -> Result<Vec<(i32, f64)>> {
        if self.step == 0 {
            bail!("--step must be at least 1");
        }
        if self.from > self.to {
            bail!("--from ({}) is greater than --to ({})", self.from, self.to);
        }

        let curve = self.algorithm.curve(self.display_scale);
        let step = usize::try_from(self.step)?;
        Ok((self.from..=self.to)
            .step_by(step)
            .map(|delta| (delta, curve.speed(delta)))
            .collect())
    }
}

pub fn run(table: SpeedTable) -> Result<()> {
    let rows = table.rows()?;
    let curve = table.algorithm.curve(table.display_scale);
    println!("# {} ({}), px/s", curve.name(), table.algorithm);
    println!("{:>8}  {:>12}", "delta", "speed");
    for (delta, speed) in rows {
        println!("{delta:>8}  {speed:>12.2}");
    }
    Ok(())
}
