//! Static route table shared by the router and the navigation bar.

/// Every page the shell can show
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PageId {
    Dashboard,
    MouseFollow,
    ScrollNotifier,
    InfiniteScroll,
    MutationTracker,
    EmployeeList,
}

/// A path, its nav label and the page it mounts
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub label: &'static str,
    pub page: PageId,
}

/// Path of the shell that every page is nested under
pub const SHELL_PATH: &str = "/";

/// Ordered route table. The first entry is the index route.
pub const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor {
        path: "/",
        label: "Dashboard",
        page: PageId::Dashboard,
    },
    RouteDescriptor {
        path: "/mouseFollowingCircle",
        label: "Mouse Following Circle",
        page: PageId::MouseFollow,
    },
    RouteDescriptor {
        path: "/scrollNotifier",
        label: "Scroll Notifier",
        page: PageId::ScrollNotifier,
    },
    RouteDescriptor {
        path: "/infiniteScrolling",
        label: "Infinite Scrolling",
        page: PageId::InfiniteScroll,
    },
    RouteDescriptor {
        path: "/domChangeTracker",
        label: "DOM Change Tracker",
        page: PageId::MutationTracker,
    },
    RouteDescriptor {
        path: "/paginatedEmpList",
        label: "Paginated Employee List",
        page: PageId::EmployeeList,
    },
];

/// Resolves paths against a route table
#[derive(Debug, Clone, Copy)]
pub struct Router {
    routes: &'static [RouteDescriptor],
}

impl Router {
    pub fn new() -> Self {
        Self { routes: ROUTES }
    }

    /// Router over a custom table. The first entry is the index, so the
    /// table must not be empty.
    pub fn with_routes(routes: &'static [RouteDescriptor]) -> Option<Self> {
        if routes.is_empty() {
            return None;
        }
        Some(Self { routes })
    }

    pub fn routes(&self) -> &'static [RouteDescriptor] {
        self.routes
    }

    /// The index route's descriptor
    pub fn index(&self) -> &'static RouteDescriptor {
        &self.routes[0]
    }

    /// Position of the route matching `path`, if declared.
    ///
    /// Paths are compared without a trailing slash and may omit the leading
    /// one, so `scrollNotifier`, `/scrollNotifier` and `/scrollNotifier/`
    /// all resolve the same way. The empty path is the index.
    pub fn position(&self, path: &str) -> Option<usize> {
        let wanted = normalize(path);
        self.routes.iter().position(|r| normalize(r.path) == wanted)
    }

    pub fn resolve(&self, path: &str) -> Option<&'static RouteDescriptor> {
        let routes = self.routes;
        self.position(path).map(|i| &routes[i])
    }

    pub fn position_of(&self, page: PageId) -> Option<usize> {
        self.routes.iter().position(|r| r.page == page)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(path: &str) -> &str {
    path.trim().trim_matches('/')
}
