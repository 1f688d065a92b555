//! Event dispatch for dashboard interactions.
//!
//! Each [`DashboardEvent`] maps to a fixed set of component updates. The
//! handlers are synchronous and pure over the shared [`AppState`]; nothing
//! here is remembered between events.

use tree_census_analytics::{main_map, project_columns, status_map, table_columns};
use tree_census_analytics_models::{FilterState, StaticAnalytics};
use tree_census_server_models::{
    ChecklistOption, DASHBOARD_TITLE, DashboardEvent, DashboardUpdate, NavLink, Page,
    PageContent, PageLayout, TABLE_PAGE_SIZE,
};

use crate::AppState;

/// Builds the layout for `page`, including its controls and their
/// initial selections.
#[must_use]
pub fn layout_for(state: &AppState, page: Page) -> PageLayout {
    let analytics = &state.analytics;

    let content = match page {
        Page::Map => PageContent::Map {
            health_options: analytics
                .health_values
                .iter()
                .map(|h| ChecklistOption {
                    label: h.clone(),
                    value: h.clone(),
                })
                .collect(),
            selected_health: analytics.health_values.clone(),
            table_columns: table_columns(),
            page_size: TABLE_PAGE_SIZE,
        },
        Page::Analytics => PageContent::Analytics {
            analytics: Box::new(StaticAnalytics::clone(analytics)),
            status_tabs: analytics.status_values.clone(),
            selected_status: analytics.default_status().map(ToString::to_string),
        },
    };

    PageLayout {
        title: DASHBOARD_TITLE.to_string(),
        nav: Page::all()
            .iter()
            .map(|p| NavLink {
                label: p.label().to_string(),
                href: p.path().to_string(),
            })
            .collect(),
        content,
    }
}

/// Runs the handlers wired to `event` and returns their updates in a
/// stable order.
#[must_use]
pub fn dispatch(state: &AppState, event: DashboardEvent) -> Vec<DashboardUpdate> {
    log::debug!("Dispatching {event:?}");

    match event {
        DashboardEvent::PathChanged(pathname) => {
            let page = Page::from_pathname(&pathname);
            vec![DashboardUpdate::PageContent(Box::new(layout_for(
                state, page,
            )))]
        }
        DashboardEvent::HealthSelectionChanged(selected) => {
            let filter = FilterState::health(selected);
            vec![
                DashboardUpdate::MainMap(main_map(&state.dataset, &filter)),
                DashboardUpdate::MapTable(project_columns(&state.dataset, &filter)),
            ]
        }
        DashboardEvent::StatusTabChanged(status) => {
            vec![DashboardUpdate::AnalyticsMap(status_map(
                &state.dataset,
                &status,
            ))]
        }
    }
}

#[cfg(test)]
mod tests {
    use tree_census_analytics_models::{ColorScale, MapCenter};

    use super::*;
    use crate::test_utils::state;

    #[test]
    fn path_change_renders_requested_page() {
        let state = state();

        let updates = dispatch(&state, DashboardEvent::PathChanged("/analytics".to_string()));
        let [DashboardUpdate::PageContent(layout)] = updates.as_slice() else {
            panic!("expected a single page update, got {updates:?}");
        };
        assert_eq!(layout.page(), Page::Analytics);

        let updates = dispatch(&state, DashboardEvent::PathChanged("/".to_string()));
        let [DashboardUpdate::PageContent(layout)] = updates.as_slice() else {
            panic!("expected a single page update, got {updates:?}");
        };
        assert_eq!(layout.page(), Page::Map);
        assert_eq!(layout.title, DASHBOARD_TITLE);
        assert_eq!(layout.nav.len(), 2);
    }

    #[test]
    fn map_layout_checks_every_health_value() {
        let layout = layout_for(&state(), Page::Map);
        let PageContent::Map {
            health_options,
            selected_health,
            table_columns,
            page_size,
        } = layout.content
        else {
            panic!("expected map content");
        };
        assert_eq!(selected_health, ["Good", "Poor"]);
        assert_eq!(health_options.len(), 2);
        assert_eq!(health_options[0].value, "Good");
        assert_eq!(table_columns.len(), 6);
        assert_eq!(page_size, TABLE_PAGE_SIZE);
    }

    #[test]
    fn analytics_layout_defaults_to_first_status() {
        let layout = layout_for(&state(), Page::Analytics);
        let PageContent::Analytics {
            status_tabs,
            selected_status,
            analytics,
        } = layout.content
        else {
            panic!("expected analytics content");
        };
        assert_eq!(status_tabs, ["Alive", "Dead", "Stump"]);
        assert_eq!(selected_status.as_deref(), Some("Alive"));
        assert_eq!(analytics.diameter_histogram.clipped, 1);
    }

    #[test]
    fn health_change_updates_map_and_table() {
        let updates = dispatch(
            &state(),
            DashboardEvent::HealthSelectionChanged(vec!["Good".to_string()]),
        );
        let [DashboardUpdate::MainMap(map), DashboardUpdate::MapTable(rows)] = updates.as_slice()
        else {
            panic!("expected map and table updates, got {updates:?}");
        };
        assert_eq!(map.districts.len(), 2);
        assert_eq!(map.districts.iter().map(|d| d.count).sum::<u64>(), 2);
        assert_eq!(map.color_scale, None);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn clearing_the_checklist_yields_empty_map() {
        let updates = dispatch(&state(), DashboardEvent::HealthSelectionChanged(Vec::new()));
        let [DashboardUpdate::MainMap(map), DashboardUpdate::MapTable(rows)] = updates.as_slice()
        else {
            panic!("expected map and table updates, got {updates:?}");
        };
        assert!(map.districts.is_empty());
        assert_eq!(map.center, None);
        assert_eq!(map.display_center, MapCenter::NYC);
        assert!(rows.is_empty());
    }

    #[test]
    fn status_tab_change_updates_analytics_map() {
        let updates = dispatch(&state(), DashboardEvent::StatusTabChanged("Dead".to_string()));
        let [DashboardUpdate::AnalyticsMap(map)] = updates.as_slice() else {
            panic!("expected an analytics map update, got {updates:?}");
        };
        assert_eq!(map.districts.len(), 1);
        assert_eq!(map.districts[0].district.to_string(), "1");
        assert_eq!(map.color_scale, Some(ColorScale::new("lightcoral", "red")));
    }
}
