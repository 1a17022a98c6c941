use rollplan::testing::{evac_triple, mirrored_pair};
use rollplan::{PlannerOptions, RenderOptions, build_plan, render_plan};

#[test]
fn default_output_is_header_plus_group_lines() -> anyhow::Result<()> {
    let data = mirrored_pair()?;
    let plan = build_plan(&data, &PlannerOptions::default())?;
    let text = render_plan(&data, &plan, &RenderOptions::default())?;
    assert_eq!(text, "Node Reboot Groups\nnode2\nnode1\n");
    Ok(())
}

#[test]
fn no_headers_suppresses_the_header_line() -> anyhow::Result<()> {
    let data = mirrored_pair()?;
    let plan = build_plan(&data, &PlannerOptions::default())?;
    let opts = RenderOptions {
        no_headers: true,
        ..RenderOptions::default()
    };
    assert_eq!(render_plan(&data, &plan, &opts)?, "node2\nnode1\n");
    Ok(())
}

#[test]
fn print_moves_indents_evacuations_under_their_group() -> anyhow::Result<()> {
    let data = evac_triple()?;
    let plan = build_plan(&data, &PlannerOptions::default())?;
    let opts = RenderOptions {
        print_moves: true,
        ..RenderOptions::default()
    };
    let text = render_plan(&data, &plan, &opts)?;
    assert_eq!(
        text,
        "Node Reboot Groups\nnode1,node3\n  solo node2\nnode2\n"
    );
    Ok(())
}

#[test]
fn verbose_output_appends_summary_then_graph() -> anyhow::Result<()> {
    let data = mirrored_pair()?;
    let plan = build_plan(&data, &PlannerOptions::default())?;

    let base = render_plan(&data, &plan, &RenderOptions::default())?;
    assert!(!base.contains("COLORING HEURISTICS"));

    let opts = RenderOptions {
        verbose: 2,
        ..RenderOptions::default()
    };
    let text = render_plan(&data, &plan, &opts)?;
    assert!(text.contains("COLORING HEURISTICS"));
    assert!(text.contains("reboot groups: 2"));
    assert!(!text.contains("-> ["));

    let opts = RenderOptions {
        verbose: 3,
        ..RenderOptions::default()
    };
    let text = render_plan(&data, &plan, &opts)?;
    assert!(text.contains("0 -> [1]"));
    Ok(())
}

#[test]
fn rendering_is_byte_identical_across_runs() -> anyhow::Result<()> {
    let data = evac_triple()?;
    let opts = RenderOptions {
        print_moves: true,
        verbose: 3,
        ..RenderOptions::default()
    };
    let a = render_plan(&data, &build_plan(&data, &PlannerOptions::default())?, &opts)?;
    let b = render_plan(&data, &build_plan(&data, &PlannerOptions::default())?, &opts)?;
    assert_eq!(a, b);
    Ok(())
}
