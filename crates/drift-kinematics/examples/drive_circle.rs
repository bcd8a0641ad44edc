use drift_kinematics::*;

fn main() {
    let axle_length = 1.0;
    let wheel_speeds = WheelSpeeds::new(0.0, 1.0); // Left wheel stopped, right wheel 1 m/s

    let setup = DifferentialDrive::new(axle_length).and_then(|kinematics| {
        TimeStep::new(0.1).map(|dt| (kinematics, dt))
    });

    match setup {
        Ok((kinematics, dt)) => {
            let num_steps = kinematics.steps_per_revolution(wheel_speeds, dt).unwrap_or(64);
            let mut current_pose = Pose::origin();

            println!("Initializing simulation...");
            println!("  Differential Drive Parameters:");
            println!("    Axle Length:  {} m", kinematics.axle_length());
            println!("  Initial State:");
            println!("    Pose:         {}", current_pose);
            println!("    Wheel Speeds: {}", wheel_speeds);
            println!("    Chassis:      {}", kinematics.forward_kinematics(wheel_speeds));
            println!("  Simulation Settings:");
            println!("    Time Step:    {} s", dt.seconds());
            println!("    Num Steps:    {}", num_steps);
            println!("\nSimulating...");

            for i in 0..num_steps {
                current_pose = kinematics.advance_with_speeds(current_pose, wheel_speeds, dt);
                println!("Step {:>2}: Pose: {}", i + 1, current_pose);
            }

            println!("\nSimulation complete.");
            println!("Final Pose: {:?}", current_pose);
            println!("Distance from start: {:.4} m", current_pose.distance_to(&Pose::origin()));
        }
        Err(e) => {
            eprintln!("Failed to initialize kinematics: {}", e);
        }
    }
}
