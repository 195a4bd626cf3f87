//! SVG surface for a [`ChartSpec`].
//!
//! Geometry comes from the [`ChartSpec`] as fractions; this component only scales it
//! to the view box. Every mark carries a `<title>` so hovering shows the
//! formatted value.

use crate::i18n::{number_locale, t, use_ui_lang};
use orderdesk_core::{ChartKind, ChartSpec, CurrencyCode};
use std::f64::consts::TAU;
use yew::prelude::*;

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 200.0;
const LABEL_BAND: f64 = 20.0;
const RADIUS: f64 = 90.0;
const DOUGHNUT_HOLE: f64 = 45.0;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub spec: ChartSpec,
    pub currency: CurrencyCode,
    #[prop_or_default]
    pub title: Option<AttrValue>,
}

fn is_empty(spec: &ChartSpec) -> bool {
    match spec.kind {
        ChartKind::Pie | ChartKind::Doughnut => spec.slice_angles().is_empty(),
        ChartKind::Bar | ChartKind::Line => spec.datasets.iter().all(|d| d.values.is_empty()),
    }
}

fn point_on_circle(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.sin(), cy - r * angle.cos())
}

/// SVG path of a pie slice between two angles.
fn slice_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    let (x0, y0) = point_on_circle(cx, cy, r, start);
    let (x1, y1) = point_on_circle(cx, cy, r, end);
    let large_arc = u8::from(end - start > TAU / 2.0);
    format!("M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z")
}

fn bars(p: &Props) -> Html {
    let plot = HEIGHT - LABEL_BAND;
    let locale = number_locale();
    let Some(dataset) = p.spec.datasets.first() else {
        return Html::default();
    };
    p.spec
        .bar_geometry()
        .into_iter()
        .enumerate()
        .map(|(i, (x, y, w, h))| {
            let label = p.spec.labels.get(i).cloned().unwrap_or_default();
            let fill = dataset.color_at(i);
            html! {
                <g class="chart-bar">
                    <rect
                        x={format!("{:.2}", x * WIDTH)}
                        y={format!("{:.2}", y * plot)}
                        width={format!("{:.2}", w * WIDTH)}
                        height={format!("{:.2}", h * plot)}
                        fill={fill.css()}
                        stroke={fill.with_alpha(1.0).css()}
                    >
                        <title>{ p.spec.tooltip(0, i, locale, &p.currency) }</title>
                    </rect>
                    <text
                        x={format!("{:.2}", (x + w / 2.0) * WIDTH)}
                        y={format!("{:.2}", HEIGHT - 5.0)}
                        text-anchor="middle"
                        font-size="10"
                    >
                        { label }
                    </text>
                </g>
            }
        })
        .collect()
}

fn slices(p: &Props) -> Html {
    let locale = number_locale();
    let (cx, cy) = (WIDTH / 2.0, HEIGHT / 2.0);
    let Some(dataset) = p.spec.datasets.first() else {
        return Html::default();
    };
    let marks = p
        .spec
        .slice_angles()
        .into_iter()
        .enumerate()
        .filter(|(_, (start, end))| end > start)
        .map(|(i, (start, end))| {
            let title = html! { <title>{ p.spec.tooltip(0, i, locale, &p.currency) }</title> };
            let fill = dataset.color_at(i).css();
            if end - start >= TAU - f64::EPSILON {
                html! {
                    <circle cx={cx.to_string()} cy={cy.to_string()} r={RADIUS.to_string()} {fill} stroke="#fff">
                        { title }
                    </circle>
                }
            } else {
                html! {
                    <path d={slice_path(cx, cy, RADIUS, start, end)} {fill} stroke="#fff">{ title }</path>
                }
            }
        })
        .collect::<Html>();
    let hole = (p.spec.kind == ChartKind::Doughnut).then(|| {
        html! { <circle cx={cx.to_string()} cy={cy.to_string()} r={DOUGHNUT_HOLE.to_string()} fill="#fff" /> }
    });
    html! { <>{ marks }{ hole }</> }
}

fn lines(p: &Props) -> Html {
    let plot = HEIGHT - LABEL_BAND;
    let locale = number_locale();
    let series = p
        .spec
        .datasets
        .iter()
        .enumerate()
        .map(|(d, dataset)| {
            let points = p.spec.line_points(d);
            let scaled: Vec<(f64, f64)> = points.iter().map(|(x, y)| (x * WIDTH, y * plot)).collect();
            let polyline = scaled
                .iter()
                .map(|(x, y)| format!("{x:.2},{y:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            let colour = dataset.color_at(0);
            let area = (dataset.fill && !scaled.is_empty()).then(|| {
                let first_x = scaled.first().map_or(0.0, |pt| pt.0);
                let last_x = scaled.last().map_or(0.0, |pt| pt.0);
                let polygon = format!("{first_x:.2},{plot:.2} {polyline} {last_x:.2},{plot:.2}");
                html! { <polygon points={polygon} fill={colour.css()} stroke="none" /> }
            });
            let dots = scaled
                .iter()
                .enumerate()
                .map(|(i, (x, y))| {
                    html! {
                        <circle cx={format!("{x:.2}")} cy={format!("{y:.2}")} r="3" fill={colour.with_alpha(1.0).css()}>
                            <title>{ p.spec.tooltip(d, i, locale, &p.currency) }</title>
                        </circle>
                    }
                })
                .collect::<Html>();
            html! {
                <g class="chart-series">
                    { area }
                    <polyline points={polyline} fill="none" stroke={colour.with_alpha(1.0).css()} stroke-width="2" />
                    { dots }
                </g>
            }
        })
        .collect::<Html>();
    let step = if p.spec.labels.len() > 1 {
        WIDTH / f64::from(u32::try_from(p.spec.labels.len() - 1).unwrap_or(u32::MAX))
    } else {
        0.0
    };
    let labels = p
        .spec
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let x = step * f64::from(u32::try_from(i).unwrap_or(u32::MAX));
            html! {
                <text x={format!("{x:.2}")} y={format!("{:.2}", HEIGHT - 5.0)} text-anchor="middle" font-size="10">
                    { label.clone() }
                </text>
            }
        })
        .collect::<Html>();
    html! { <>{ series }{ labels }</> }
}

#[function_component(Chart)]
pub fn chart(p: &Props) -> Html {
    let _lang = use_ui_lang();
    let body = if is_empty(&p.spec) {
        html! { <p class="text-muted text-center my-4">{ t("chart.empty") }</p> }
    } else {
        let marks = match p.spec.kind {
            ChartKind::Bar => bars(p),
            ChartKind::Pie | ChartKind::Doughnut => slices(p),
            ChartKind::Line => lines(p),
        };
        html! {
            <svg
                viewBox={format!("0 0 {WIDTH} {HEIGHT}")}
                role="img"
                aria-label={p.title.clone()}
                class={classes!("chart", format!("chart-{:?}", p.spec.kind).to_lowercase())}
                data-revision={p.spec.revision.to_string()}
            >
                { marks }
            </svg>
        }
    };
    html! {
        <div id={p.spec.container_id.clone()} class="chart-container">
            { body }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_slices_use_the_short_arc() {
        let path = slice_path(100.0, 100.0, 50.0, 0.0, TAU / 4.0);
        assert!(path.starts_with("M 100.00 100.00 L 100.00 50.00"));
        assert!(path.contains(" 0 0 1 150.00 100.00"));
        let big = slice_path(100.0, 100.0, 50.0, 0.0, TAU * 0.75);
        assert!(big.contains(" 0 1 1 "));
    }
}
