//! Route description for the winning station.

use bfp_core::{Address, Origin};

use crate::provider::MapProvider;

const NO_ROUTE_HTML: &str = r#"<div style="padding:8px">Keine Route verfügbar.</div>"#;

/// Result of describing a route. Never an error: failures become a
/// displayable placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteView {
    /// An embeddable map URL for the route.
    Embedded { url: String },
    /// No route was requested (distance mode off or no address).
    Unavailable,
    /// The route could not be built.
    Failed { reason: String },
}

impl RouteView {
    /// HTML snippet for publishing.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            RouteView::Embedded { url } => format!(
                r#"<iframe width="500" height="500" frameborder="0" style="border:0" scrolling="no" marginheight="0" marginwidth="0" src="{}"></iframe>"#,
                html_escape::encode_double_quoted_attribute(url)
            ),
            RouteView::Unavailable => NO_ROUTE_HTML.to_string(),
            RouteView::Failed { reason } => format!(
                r#"<div style="padding:8px">Route konnte nicht berechnet werden: {}</div>"#,
                html_escape::encode_text(reason)
            ),
        }
    }
}

/// Describe the route from `origin` to `address`.
pub fn describe<M: MapProvider>(address: &Address, origin: Origin, maps: &M) -> RouteView {
    let destination = address.destination();
    if destination.is_empty() || destination == "," {
        return RouteView::Failed {
            reason: "destination address is empty".to_string(),
        };
    }

    match maps.embed_route_url(origin, &destination) {
        Ok(url) => RouteView::Embedded { url },
        Err(e) => {
            tracing::warn!(destination = %destination, error = %e, "route description failed");
            RouteView::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{address, FakeMaps, ORIGIN};

    #[test]
    fn embeds_route_iframe() {
        let view = describe(&address("Weg 1", "22041 Hamburg"), ORIGIN, &FakeMaps::new());
        let RouteView::Embedded { url } = &view else {
            panic!("expected embedded route, got {view:?}");
        };
        assert!(url.contains("destination=Weg 1 , 22041 Hamburg"));

        let html = view.to_html();
        assert!(html.starts_with(r#"<iframe width="500" height="500""#));
        assert!(html.contains("origin=53.6,10&amp;destination="));
        assert!(html.ends_with("></iframe>"));
    }

    #[test]
    fn blank_destination_fails_fast() {
        let view = describe(&address(" ", " "), ORIGIN, &FakeMaps::new());
        assert!(matches!(view, RouteView::Failed { .. }));
    }

    #[test]
    fn provider_failure_becomes_escaped_placeholder() {
        let maps = FakeMaps::new().failing_embed();
        let view = describe(&address("Weg 1", "22041 Hamburg"), ORIGIN, &maps);
        assert_eq!(
            view.to_html(),
            r#"<div style="padding:8px">Route konnte nicht berechnet werden: REQUEST_DENIED &lt;quota&gt;</div>"#
        );
    }

    #[test]
    fn unavailable_route_has_fixed_text() {
        assert_eq!(RouteView::Unavailable.to_html(), NO_ROUTE_HTML);
    }
}
