//! Sales dashboard: monthly figures, charts and the latest orders.

use crate::bootstrap::{DashboardData, RecentOrder};
use crate::components::button::Button;
use crate::components::chart::Chart;
use crate::components::table_filter::TableFilter;
use crate::i18n::{fmt_date, fmt_money, t, use_ui_lang};
use orderdesk_core::{ChartSpec, CurrencyCode, Money, filter_rows};
use std::rc::Rc;
use yew::prelude::*;

const RECENT_ORDERS_TABLE: &str = "recentOrdersTable";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub data: Rc<DashboardData>,
    pub currency: CurrencyCode,
}

/// Which series the monthly chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlySeries {
    Sales,
    Commission,
}

/// Bootstrap badge class for an order status.
#[must_use]
pub fn status_badge(status: &str) -> &'static str {
    match status {
        "pending" => "badge text-bg-warning",
        "confirmed" => "badge text-bg-info",
        "shipped" => "badge text-bg-primary",
        "delivered" => "badge text-bg-success",
        "cancelled" => "badge text-bg-danger",
        _ => "badge text-bg-secondary",
    }
}

/// Show `series` on the monthly chart.
pub fn switch_series(spec: &mut ChartSpec, data: &DashboardData, series: MonthlySeries) {
    let (values, label) = match series {
        MonthlySeries::Sales => (data.monthly_sales.clone(), t("dashboard.monthly_sales")),
        MonthlySeries::Commission => (
            data.monthly_commission.clone(),
            t("dashboard.monthly_commission"),
        ),
    };
    spec.update_chart_data(values, Some(data.month_labels.clone()));
    if let Some(first) = spec.datasets.first_mut() {
        first.label = Some(label);
    }
}

/// Searchable text of a recent-orders row.
fn row_text(order: &RecentOrder, currency: &CurrencyCode) -> String {
    format!(
        "{} {} {} {} {}",
        order.id,
        order.customer_name,
        fmt_date(&order.order_date),
        order.status,
        fmt_money(order.total_amount, currency)
    )
}

fn stat_card(label: String, value: String) -> Html {
    html! {
        <div class="col-md-4">
            <div class="card text-center">
                <div class="card-body">
                    <div class="text-muted small">{ label }</div>
                    <div class="fs-4 fw-bold">{ value }</div>
                </div>
            </div>
        </div>
    }
}

fn chart_card(title: String, body: Html) -> Html {
    html! {
        <div class="col-lg-6 mb-3">
            <div class="card h-100">
                <div class="card-header">{ title }</div>
                <div class="card-body">{ body }</div>
            </div>
        </div>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page(p: &Props) -> Html {
    let _lang = use_ui_lang();
    let data = p.data.clone();
    let series = use_state(|| MonthlySeries::Sales);
    let monthly = {
        let data = data.clone();
        use_state(move || {
            ChartSpec::sales_bar(
                "monthlySalesChart",
                data.monthly_sales.clone(),
                data.month_labels.clone(),
                Some(t("dashboard.monthly_sales").as_str()),
            )
        })
    };
    let filter = use_state(String::new);

    let on_toggle = {
        let series = series.clone();
        let monthly = monthly.clone();
        let data = data.clone();
        Callback::from(move |_: MouseEvent| {
            let next = match *series {
                MonthlySeries::Sales => MonthlySeries::Commission,
                MonthlySeries::Commission => MonthlySeries::Sales,
            };
            let mut spec = (*monthly).clone();
            switch_series(&mut spec, &data, next);
            monthly.set(spec);
            series.set(next);
        })
    };
    let on_filter = {
        let filter = filter.clone();
        Callback::from(move |term: String| filter.set(term))
    };

    let toggle_label = match *series {
        MonthlySeries::Sales => t("dashboard.show_commission"),
        MonthlySeries::Commission => t("dashboard.show_sales"),
    };
    let category = ChartSpec::category_pie(
        "categorySalesChart",
        data.category_sales.clone(),
        data.category_labels.clone(),
    );
    let status = ChartSpec::status_doughnut(
        "orderStatusChart",
        data.status_counts.clone(),
        data.status_labels.clone(),
    );
    let trend = ChartSpec::commission_line(
        "commissionChart",
        data.monthly_sales.clone(),
        data.monthly_commission.clone(),
        data.month_labels.clone(),
    );

    let texts: Vec<String> = data
        .recent_orders
        .iter()
        .map(|order| row_text(order, &p.currency))
        .collect();
    let rows = if data.recent_orders.is_empty() {
        html! { <tr><td colspan="5" class="text-center text-muted">{ t("dashboard.no_orders") }</td></tr> }
    } else {
        filter_rows(&texts, &filter)
            .into_iter()
            .filter_map(|i| data.recent_orders.get(i))
            .map(|order| {
                html! {
                    <tr key={order.id.clone()}>
                        <td>{ format!("#{}", order.id) }</td>
                        <td>{ order.customer_name.clone() }</td>
                        <td>{ fmt_date(&order.order_date) }</td>
                        <td><span class={status_badge(&order.status)}>{ order.status.clone() }</span></td>
                        <td class="text-end">{ fmt_money(order.total_amount, &p.currency) }</td>
                    </tr>
                }
            })
            .collect::<Html>()
    };
    let total_sales = Money::from_major(data.total_sales).unwrap_or(Money::ZERO);

    html! {
        <section aria-labelledby="dashboard-title">
            <h1 id="dashboard-title" class="h3 mb-3">{ t("dashboard.title") }</h1>
            <div class="row g-3 mb-3">
                { stat_card(t("dashboard.orders_month"), data.orders_count.to_string()) }
                { stat_card(t("dashboard.customers"), data.customers_count.to_string()) }
                { stat_card(t("dashboard.total_sales"), fmt_money(total_sales, &p.currency)) }
            </div>
            <div class="row">
                { chart_card(t("dashboard.monthly_sales"), html! {
                    <>
                        <Chart spec={(*monthly).clone()} currency={p.currency.clone()} />
                        <Button
                            id={AttrValue::Static("toggle-monthly-series")}
                            label={toggle_label}
                            class="btn btn-sm btn-outline-primary mt-2"
                            pressed={*series == MonthlySeries::Commission}
                            onclick={on_toggle}
                        />
                    </>
                }) }
                { chart_card(t("dashboard.by_category"), html! {
                    <Chart spec={category} currency={p.currency.clone()} />
                }) }
                { chart_card(t("dashboard.by_status"), html! {
                    <Chart spec={status} currency={p.currency.clone()} />
                }) }
                { chart_card(t("dashboard.sales_vs_commission"), html! {
                    <Chart spec={trend} currency={p.currency.clone()} />
                }) }
            </div>
            <div class="card">
                <div class="card-header d-flex justify-content-between align-items-center">
                    <span>{ t("dashboard.recent_orders") }</span>
                    <TableFilter
                        table={RECENT_ORDERS_TABLE}
                        value={AttrValue::from((*filter).clone())}
                        placeholder={t("dashboard.filter")}
                        {on_filter}
                    />
                </div>
                <table id={RECENT_ORDERS_TABLE} class="table table-sm mb-0">
                    <thead>
                        <tr>
                            <th>{ t("dashboard.order") }</th>
                            <th>{ t("dashboard.customer") }</th>
                            <th>{ t("dashboard.date") }</th>
                            <th>{ t("dashboard.status") }</th>
                            <th class="text-end">{ t("dashboard.amount") }</th>
                        </tr>
                    </thead>
                    <tbody>{ rows }</tbody>
                </table>
            </div>
        </section>
    }
}
