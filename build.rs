//! Build script to generate the fixed-point angle table
//!
//! The rasterizer quantizes rotations to 1024 steps per turn. For each step
//! we emit sine, cosine and the two shear factors of the three-shear
//! rotation, so the device never evaluates trig for a fixed-point angle.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

const STEPS: usize = 1024;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR").unwrap();
    let table_path = Path::new(&out_dir).join("angle_table.rs");

    generate_angle_table(&table_path);
}

/// Snap values that should be exactly 0 or ±1 at quadrant boundaries
fn snap(v: f64) -> f32 {
    if v.abs() < 1e-9 {
        0.0
    } else if (v.abs() - 1.0).abs() < 1e-9 {
        v.signum() as f32
    } else {
        v as f32
    }
}

/// Emit `[sin, cos, shear_x, shear_y]` per step.
///
/// Shear factors rotate by the angle reduced into [-90°, 90°]; steps in the
/// open interval (256, 768) are first rotated by a half turn (negation),
/// which keeps `tan(θ/2)` bounded.
fn generate_angle_table(path: &Path) {
    let mut table = String::new();
    table.push_str("pub(crate) static ANGLE_TABLE: [[f32; 4]; 1024] = [\n");

    for i in 0..STEPS {
        let theta = i as f64 * std::f64::consts::TAU / STEPS as f64;

        let reduced_steps = if i > 256 && i < 768 {
            i as i64 - 512
        } else if i >= 768 {
            i as i64 - 1024
        } else {
            i as i64
        };
        let reduced = reduced_steps as f64 * std::f64::consts::TAU / STEPS as f64;

        let sin = snap(theta.sin());
        let cos = snap(theta.cos());
        let shear_x = snap(-(reduced / 2.0).tan());
        let shear_y = snap(reduced.sin());

        table.push_str(&format!(
            "    [{:?}, {:?}, {:?}, {:?}],\n",
            sin, cos, shear_x, shear_y
        ));
    }

    table.push_str("];\n");

    let mut file = fs::File::create(path).unwrap();
    file.write_all(table.as_bytes()).unwrap();
}
