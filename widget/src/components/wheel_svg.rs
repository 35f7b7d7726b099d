use yew::prelude::*;

/// One rendered wedge: label text, fill color, optional icon glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub label: String,
    pub color: String,
    pub icon: Option<String>,
}

#[derive(Properties, PartialEq)]
pub struct WheelSvgProps {
    pub segments: Vec<Segment>,
    pub rotation: f64,
    pub duration_ms: u32,
    pub spinning: bool,
    pub on_spin: Callback<MouseEvent>,
    #[prop_or(240)]
    pub size: u32,
    #[prop_or(AttrValue::Static("SPIN"))]
    pub button_text: AttrValue,
    #[prop_or(AttrValue::Static("#6d28d9"))]
    pub accent_color: AttrValue,
    #[prop_or(AttrValue::Static("#ffffff"))]
    pub text_color: AttrValue,
}

fn polar_to_cartesian(cx: f64, cy: f64, radius: f64, angle_degrees: f64) -> (f64, f64) {
    let radians = (angle_degrees - 90.0).to_radians();
    (cx + radius * radians.cos(), cy + radius * radians.sin())
}

fn describe_arc(cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) -> String {
    let (start_x, start_y) = polar_to_cartesian(cx, cy, radius, end_angle);
    let (end_x, end_y) = polar_to_cartesian(cx, cy, radius, start_angle);
    let large_arc = if end_angle - start_angle <= 180.0 { 0 } else { 1 };
    format!(
        "M {cx} {cy} L {start_x} {start_y} A {radius} {radius} 0 {large_arc} 0 {end_x} {end_y} Z"
    )
}

/// Truncate a label to what fits inside the wedge at its label radius,
/// using an average glyph width heuristic of ~0.58em.
fn fit_label_to_slice(text: &str, font_px: f64, radius: f64, slice_degrees: f64) -> String {
    if text.is_empty() {
        return String::new();
    }
    let arc_length = 2.0 * std::f64::consts::PI * (radius * 0.56) * (slice_degrees / 360.0);
    let padding = (radius * 0.04).max(6.0);
    let available = (arc_length - padding).max(0.0);
    let max_chars = ((available / (font_px * 0.58)).floor() as usize).max(1);
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 1 {
        return "…".to_string();
    }
    let mut fitted: String = chars[..max_chars - 1].iter().collect();
    fitted.push('…');
    fitted
}

/// The wheel itself: SVG wedges under a fixed top pointer, rotated with a
/// CSS transition, with the spin button in the hub.
#[function_component(WheelSvg)]
pub fn wheel_svg(props: &WheelSvgProps) -> Html {
    let size = props.size as f64;
    let r = size / 2.0;
    let (cx, cy) = (r, r);
    let total = props.segments.len().max(1);
    let slice = 360.0 / total as f64;
    let any_icons = props.segments.iter().any(|s| s.icon.is_some());
    let label_font = (r * 0.10).max(9.0);

    let wheel_style = format!(
        "width: {size}px; height: {size}px; transform: rotate({}deg); \
         transition: transform {}ms cubic-bezier(0.22, 1, 0.36, 1);",
        props.rotation, props.duration_ms,
    );

    html! {
        <div class="relative mx-auto" style={format!("width: {size}px; height: {size}px;")}>
            // Pointer at twelve o'clock
            <div
                class="absolute left-1/2 -translate-x-1/2 -top-4"
                style="z-index: 2;"
                aria-hidden="true"
            >
                <svg width="18" height="18" viewBox="0 0 18 18">
                    <path d="M9 0 L18 18 L0 18 Z" fill="#ef4444" />
                </svg>
            </div>

            <div class="rounded-full overflow-hidden" style={wheel_style}>
                <svg width={props.size.to_string()} height={props.size.to_string()}
                     viewBox={format!("0 0 {} {}", props.size, props.size)}>
                    {
                        props.segments.iter().enumerate().map(|(i, segment)| {
                            let start = i as f64 * slice;
                            let d = describe_arc(cx, cy, r, start, start + slice);
                            html! {
                                <path key={format!("slice-{i}")} {d} fill={segment.color.clone()}
                                      stroke="#111827" stroke-width="1" />
                            }
                        }).collect::<Html>()
                    }
                    {
                        props.segments.iter().enumerate().map(|(i, segment)| {
                            let mid = i as f64 * slice + slice / 2.0;
                            let (x, y) = polar_to_cartesian(cx, cy, r * 0.56, mid);
                            if let Some(icon) = &segment.icon {
                                html! {
                                    <text key={format!("icon-{i}")} x={x.to_string()} y={y.to_string()}
                                          text-anchor="middle" dominant-baseline="central"
                                          font-size={format!("{}", (r * 0.12).max(10.0))}>
                                        { icon.clone() }
                                    </text>
                                }
                            } else if !any_icons {
                                let fitted = fit_label_to_slice(&segment.label, label_font, r, slice);
                                html! {
                                    <text key={format!("lbl-{i}")} x={x.to_string()} y={y.to_string()}
                                          text-anchor="middle" dominant-baseline="central"
                                          font-size={label_font.to_string()} fill="#111">
                                        { fitted }
                                    </text>
                                }
                            } else {
                                html! {}
                            }
                        }).collect::<Html>()
                    }
                    <circle cx={cx.to_string()} cy={cy.to_string()}
                            r={format!("{}", (r * 0.18).max(18.0))}
                            fill="#111827" stroke="#1f2937" stroke-width="2" />
                </svg>
            </div>

            <button
                type="button"
                class="absolute left-1/2 top-1/2 -translate-x-1/2 -translate-y-1/2 px-3 py-1 rounded text-xs shadow"
                style={format!("background-color: {}; color: {};", props.accent_color, props.text_color)}
                onclick={props.on_spin.clone()}
                disabled={props.spinning || props.segments.is_empty()}
            >
                { props.button_text.clone() }
            </button>
        </div>
    }
}
