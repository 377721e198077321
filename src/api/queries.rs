//! GraphQL documents sent to the start.gg API

pub const DISCOVER_TOURNAMENTS: &str = r#"
query DiscoverTournaments($page: Int, $perPage: Int, $coordinates: String!, $radius: String!, $after: Timestamp, $before: Timestamp) {
  tournaments(
    query: {
      page: $page
      perPage: $perPage
      filter: { location: { distanceFrom: $coordinates, distance: $radius }, afterDate: $after, beforeDate: $before }
      sortBy: "startAt"
    }
  ) {
    nodes {
      id
      name
      city
      slug
      startAt
      events {
        slug
        numEntrants
        videogame { name }
      }
    }
  }
}
"#;

pub const GET_EVENT_ID: &str = r#"
query GetEventId($slug: String) {
  event(slug: $slug) { id name }
}
"#;

pub const GET_SETS_PAGE: &str = r#"
query EventSets($eventId: ID!, $page: Int!, $perPage: Int!) {
  event(id: $eventId) {
    sets(page: $page, perPage: $perPage, sortType: STANDARD) {
      pageInfo { totalPages }
      nodes { id }
    }
  }
}
"#;

pub const GET_SET_DETAIL: &str = r#"
query SetDetail($setId: ID!) {
  set(id: $setId) {
    slots {
      entrant {
        participants { player { gamerTag prefix } }
      }
      standing { stats { score { value } } }
    }
  }
}
"#;
