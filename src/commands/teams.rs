use crate::cache::{Cache, CachedTeam};
use crate::cli::TeamListArgs;
use crate::client::TeamsClient;
use crate::collection::PaginatedCollection;
use crate::config::Config;
use crate::error::Result;
use crate::membership::ViewContext;
use crate::output;
use crate::paging::PagingHeader;
use crate::views;

pub async fn list(client: &TeamsClient, config: &Config, args: TeamListArgs) -> Result<()> {
    let course = config.resolve_course(args.course.as_deref())?;
    let page_size = args.page_size.unwrap_or(config.page_size);

    let page = client
        .list_teams(&course, args.topic.as_deref(), args.page, page_size)
        .await?;

    let mut cache = Cache::load();
    for team in &page.results {
        cache.set_team(CachedTeam {
            id: team.id.clone(),
            name: team.name.clone(),
        });
    }
    cache.save();

    let context = ViewContext::from_config(config)?;
    let mut collection = PaginatedCollection::new();
    let (header, subscription) = PagingHeader::new("").bind(&mut collection);
    let (current_page, num_pages) = (page.current_page, page.num_pages);
    collection.reset(page.results, page.start, page.count);

    if output::is_json_output() {
        println!(
            "{}",
            serde_json::to_string_pretty(collection.items()).unwrap_or_default()
        );
    } else {
        println!(
            "{}",
            views::render_team_list(&collection, &context, &header, args.actions)
        );
        if num_pages > 1 {
            println!("Page {current_page} of {num_pages}. Use --page to navigate.");
        }
    }

    // The list view owns the header binding; release it with the view.
    collection.unsubscribe(subscription);

    Ok(())
}
