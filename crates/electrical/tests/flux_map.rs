//! Synthetic bench data from a linear PMSM model, processed and tabulated.

use approx::assert_relative_eq;
use electrical::calculations::{electrical_frequency, inductance_d_voltage, inductance_q_voltage, torque_idq};
use electrical::{MeasurementRecord, MotorParameters, build_point_set, channels};
use interpolation::TableGenerator;
use tablecore::{GridSpec, InterpolationConfig};

const PSI_PM: f64 = 0.05;
const LD: f64 = 2e-4;
const LQ: f64 = 4e-4;
const SPEED_RPM: f64 = 1000.0;

fn motor() -> MotorParameters {
    MotorParameters::new(4, 0.05, PSI_PM).unwrap()
}

/// Steady-state record at (id, iq) for the linear model.
fn bench_record(id: f64, iq: f64) -> MeasurementRecord {
    let params = motor();
    let omega = electrical_frequency(SPEED_RPM, params.pole_pairs);
    let rs = params.stator_resistance;
    MeasurementRecord {
        time_s: 0.0,
        speed_rpm: SPEED_RPM,
        torque_nm: 0.0,
        voltage_d: rs * id - omega * LQ * iq,
        voltage_q: rs * iq + omega * (PSI_PM + LD * id),
        current_d: id,
        current_q: iq,
    }
}

fn bench_sweep(step: f64, count: usize) -> Vec<MeasurementRecord> {
    let mut records = Vec::new();
    for i in 0..count {
        for j in 0..count {
            records.push(bench_record(i as f64 * step, j as f64 * step));
        }
    }
    // standstill sample, dropped during processing
    records.push(MeasurementRecord { speed_rpm: 0.0, ..bench_record(10.0, 10.0) });
    records
}

#[test]
fn test_processing_recovers_model_inductances() {
    let points = build_point_set(&bench_sweep(25.0, 5), &motor()).unwrap();
    assert_eq!(points.len(), 25);

    for p in points.iter() {
        if p.x != 0.0 {
            assert_relative_eq!(p.channel(channels::LD).unwrap(), LD, max_relative = 1e-9);
        }
        if p.y != 0.0 {
            assert_relative_eq!(p.channel(channels::LQ).unwrap(), LQ, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_voltage_and_flux_forms_agree() {
    let params = motor();
    let record = bench_record(40.0, 60.0);
    let processed = electrical::ProcessedRecord::from_record(&record, &params).unwrap();
    let omega = processed.electrical_frequency;
    let rs = params.stator_resistance;

    let ld = inductance_d_voltage(record.voltage_q, record.current_q, omega, rs, PSI_PM, record.current_d);
    let lq = inductance_q_voltage(record.voltage_d, record.current_d, omega, rs, record.current_q);
    assert_relative_eq!(ld, processed.ld, max_relative = 1e-9);
    assert_relative_eq!(lq, processed.lq, max_relative = 1e-9);
    assert_relative_eq!(
        torque_idq(params.pole_pairs, PSI_PM, LD, LQ, 40.0, 60.0),
        processed.torque_em,
        max_relative = 1e-9
    );
}

#[test]
fn test_flux_tables_on_measured_grid() {
    let points = build_point_set(&bench_sweep(25.0, 5), &motor()).unwrap();
    let generator = TableGenerator::new(
        GridSpec::new(5, 100.0).unwrap(),
        InterpolationConfig::new(30.0).unwrap(),
    )
    .unwrap();
    let tables = generator.generate(&points, &channels::FLUX).unwrap();

    let psi_d = tables.get(channels::PSI_D).unwrap();
    let psi_q = tables.get(channels::PSI_Q).unwrap();
    for i in 0..5 {
        for j in 0..5 {
            let (id, iq) = tables.coordinate(i, j).unwrap();
            assert_relative_eq!(psi_d[(i, j)], PSI_PM + LD * id, epsilon = 1e-9);
            assert_relative_eq!(psi_q[(i, j)], LQ * iq, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_interpolated_flux_stays_between_measurements() {
    let points = build_point_set(&bench_sweep(20.0, 6), &motor()).unwrap();
    let generator = TableGenerator::new(
        GridSpec::new(11, 100.0).unwrap(),
        InterpolationConfig::from_point_spread(&points).unwrap(),
    )
    .unwrap();
    let tables = generator.generate(&points, &[channels::PSI_D]).unwrap();

    let (lo, hi) = tables.get(channels::PSI_D).unwrap().range();
    assert!(lo >= PSI_PM - 1e-12);
    assert!(hi <= PSI_PM + LD * 100.0 + 1e-12);
}
