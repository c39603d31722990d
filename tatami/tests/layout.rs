use tatami::{tile, Command, CommandError, LayoutDemand, Parameters, ViewGeometry};

fn demand(view_count: u32) -> LayoutDemand {
    LayoutDemand {
        view_count,
        width: 1920,
        height: 1080,
        tags: 0b1,
        serial: 1,
    }
}

fn geometry(x: i32, y: i32, width: i32, height: i32) -> ViewGeometry {
    ViewGeometry {
        x,
        y,
        width,
        height,
    }
}

#[test]
fn test_commands_drive_layout() {
    let mut params = Parameters::default();
    for input in ["main_count +1", "view_padding 0", "outer_padding 0", "main_ratio 0.5"] {
        Command::parse(input).unwrap().apply(&mut params);
    }

    let views = tile(&demand(3), &params);
    assert_eq!(
        views,
        vec![
            geometry(0, 0, 960, 540),
            geometry(0, 540, 960, 540),
            geometry(960, 0, 960, 1080),
        ]
    );
}

#[test]
fn test_reset_after_adjustments() {
    let mut params = Parameters::default();
    for input in ["main_count 4", "main_ratio -0.4", "view_padding +20", "reset"] {
        Command::parse(input).unwrap().apply(&mut params);
    }
    assert_eq!(params, Parameters::default());
}

#[test]
fn test_rejected_command_keeps_layout() {
    let params = Parameters::default();
    let before = tile(&demand(5), &params);

    let mut updated = params;
    let err = Command::parse("main_count").map(|cmd| cmd.apply(&mut updated));
    assert_eq!(err, Err(CommandError::MissingArgument("main_count")));
    assert_eq!(tile(&demand(5), &updated), before);
}

#[test]
fn test_ratio_never_leaves_bounds() {
    let mut params = Parameters::default();
    for input in ["main_ratio +10", "main_ratio -0.01", "main_ratio -10", "main_ratio 0.0001"] {
        Command::parse(input).unwrap().apply(&mut params);
        assert!((0.1..=0.9).contains(&params.main_ratio), "{input}");
    }
}
