//! Application wiring: builder, view-local stacks, appearance forwarding and scripts.

mod support;

use std::sync::{Arc, Mutex};

use navaware::navigation::{
    BindingContext, HostCall, NavigationAware, NavigationHost, ParameterBag, View, appearing,
    disappearing,
};
use navaware::script::parse_script;
use navaware::{
    AutoWireViewModel, MemoryHost, NavigationApp, NavigationError, NavigationOptions,
    ViewModelResolver,
};
use support::{Hook, Journal, PageA, PageB, PageC, PageD, message};

fn tracked_app(journal: &Journal, host: Arc<MemoryHost>) -> NavigationApp {
    let (a, b, c, d) = (journal.clone(), journal.clone(), journal.clone(), journal.clone());
    NavigationApp::builder()
        .with_main_host(host)
        .register_page_with::<PageA, _>(Some("A"), move || Ok(PageA::new(&a)))
        .register_page_with::<PageB, _>(Some("B"), move || Ok(PageB::new(&b)))
        .register_page_with::<PageC, _>(Some("C"), move || Ok(PageC::new(&c)))
        .register_page_with::<PageD, _>(Some("D"), move || Ok(PageD::new(&d)))
        .build()
}

/// Test that a multi-segment path pairs every push with from/to hooks
#[tokio::test]
async fn test_multi_hop_path_from_single_page() {
    let journal = Journal::default();
    let host = Arc::new(MemoryHost::new());
    let app = tracked_app(&journal, host.clone());
    let navigation = app.navigation().unwrap();

    navigation.navigate_to("D", None).await.unwrap();
    journal.clear();

    let parameters = ParameterBag::new().with("message", "deep link".to_string());
    navigation.navigate("A/B/C", Some(&parameters)).await.unwrap();

    assert_eq!(host.page_names(), vec!["PageD", "PageA", "PageB", "PageC"]);
    assert_eq!(
        journal.summary(),
        vec![
            "PageD:from",
            "PageA:to",
            "PageA:from",
            "PageB:to",
            "PageB:from",
            "PageC:to"
        ]
    );
    let events = journal.events();
    for pair in events.chunks(2) {
        assert_eq!(pair[0].hook, Hook::From);
        assert_eq!(pair[1].hook, Hook::To);
    }
    for event in &events {
        assert_eq!(message(&event.parameters), Some("deep link"));
    }
}

/// Test that navigation without a main host fails but page creation still works
#[tokio::test]
async fn test_navigation_requires_main_host() {
    let app = NavigationApp::builder().register_page::<support::PlainPage>(None).build();

    assert!(matches!(
        app.navigation(),
        Err(NavigationError::NavigationUnavailable(_))
    ));
    assert!(app.create_page("PlainPage").is_ok());
}

/// Test that application options reach the controllers it hands out
#[tokio::test]
async fn test_options_flow_into_controllers() {
    let journal = Journal::default();
    let host = Arc::new(MemoryHost::new());
    let (a, b) = (journal.clone(), journal.clone());
    let app = NavigationApp::builder()
        .with_main_host(host.clone())
        .with_options(NavigationOptions {
            animate_back: false,
        })
        .register_page_with::<PageA, _>(None, move || Ok(PageA::new(&a)))
        .register_page_with::<PageB, _>(None, move || Ok(PageB::new(&b)))
        .build();

    let navigation = app.navigation().unwrap();
    navigation.navigate_to("PageA", None).await.unwrap();
    navigation.navigate_to("PageB", None).await.unwrap();
    host.clear_calls();
    navigation.go_back(None).await.unwrap();

    assert_eq!(host.calls(), vec![HostCall::Pop { animated: false }]);
}

/// A page hosted inside its own navigation stack
struct TabPage {
    stack: Arc<MemoryHost>,
}

impl View for TabPage {
    fn navigation_host(&self) -> Option<Arc<dyn NavigationHost>> {
        Some(self.stack.clone())
    }
}

/// Test that a view with its own stack navigates locally
#[tokio::test]
async fn test_navigation_for_view_uses_local_stack() {
    let journal = Journal::default();
    let main_host = Arc::new(MemoryHost::new());
    let app = tracked_app(&journal, main_host.clone());

    let tab = TabPage {
        stack: Arc::new(MemoryHost::new()),
    };
    let local = app.navigation_for_view(&tab).unwrap();
    local.navigate_to("B", None).await.unwrap();

    assert_eq!(tab.stack.page_names(), vec!["PageB"]);
    assert_eq!(main_host.depth(), 0);

    assert!(matches!(
        app.navigation_for_view(&support::PlainPage),
        Err(NavigationError::NavigationUnavailable(_))
    ));
}

/// Test that an explicit host gets its own controller
#[tokio::test]
async fn test_navigation_for_independent_host() {
    let journal = Journal::default();
    let app = tracked_app(&journal, Arc::new(MemoryHost::new()));
    let modal = Arc::new(MemoryHost::new());

    let navigation = app.navigation_for(modal.clone());
    navigation.navigate("A/B", None).await.unwrap();

    assert_eq!(modal.page_names(), vec!["PageA", "PageB"]);
}

/// Test that appearance forwarding delivers empty parameters
#[test]
fn test_appearance_events_use_empty_parameters() {
    let journal = Journal::default();
    let page = PageA::new(&journal);

    appearing(&page);
    disappearing(&page);
    appearing(&support::PlainPage);

    assert_eq!(journal.summary(), vec!["PageA:to", "PageA:from"]);
    assert!(journal.events().iter().all(|event| event.parameters.is_empty()));
}

/// Test that a parsed script replays against a controller
#[tokio::test]
async fn test_script_drives_controller() {
    let journal = Journal::default();
    let host = Arc::new(MemoryHost::new());
    let app = tracked_app(&journal, host.clone());
    let navigation = app.navigation().unwrap();

    let steps = parse_script(
        r#"
        push A
        navigate B/C/D {"message": "from script"}
        back-to B
        back
        root
        "#,
    )
    .unwrap();
    for step in &steps {
        step.run(&navigation).await.unwrap();
    }

    assert_eq!(host.page_names(), vec!["PageA"]);
    assert_eq!(
        host.calls(),
        vec![
            HostCall::Push("PageA".to_string()),
            HostCall::Push("PageB".to_string()),
            HostCall::Push("PageC".to_string()),
            HostCall::Push("PageD".to_string()),
            HostCall::Pop { animated: false },
            HostCall::Pop { animated: false },
            HostCall::Pop { animated: true },
        ]
    );
    let delivered: Vec<Option<String>> = journal
        .events()
        .iter()
        .filter(|event| event.page == "PageC" && event.hook == Hook::To)
        .map(|event| message(&event.parameters).map(str::to_string))
        .collect();
    assert_eq!(delivered, vec![Some("from script".to_string())]);
}

#[derive(Default)]
struct ProfilePage {
    context: Mutex<Option<BindingContext>>,
    auto_wire: AutoWireViewModel,
    greeting: Mutex<Option<String>>,
}

#[derive(Default)]
struct ProfileViewModel;

impl ProfilePage {
    fn new(resolver: &ViewModelResolver) -> anyhow::Result<Self> {
        let page = Self::default();
        page.auto_wire.set(&page, resolver, true)?;
        Ok(page)
    }
}

impl NavigationAware for ProfilePage {
    fn on_navigated_to(&self, parameters: &ParameterBag) {
        *self.greeting.lock().unwrap() = parameters.get_cloned::<String>("message");
    }

    fn on_navigated_from(&self, _parameters: &ParameterBag) {}
}

impl View for ProfilePage {
    fn navigation_aware(&self) -> Option<&dyn NavigationAware> {
        Some(self)
    }

    fn set_binding_context(&self, context: BindingContext) -> bool {
        *self.context.lock().unwrap() = Some(context);
        true
    }
}

/// Test that pages built by the registry auto-wire their view models
#[tokio::test]
async fn test_registered_pages_auto_wire_view_models() {
    let mut resolver = ViewModelResolver::new();
    resolver.add_known::<ProfileViewModel>();
    let resolver = Arc::new(resolver);

    let host = Arc::new(MemoryHost::new());
    let page_resolver = Arc::clone(&resolver);
    let app = NavigationApp::builder()
        .with_main_host(host.clone())
        .view_models(resolver)
        .register_page_with::<ProfilePage, _>(Some("profile"), move || {
            ProfilePage::new(&page_resolver)
        })
        .build();

    let parameters = ParameterBag::new().with("message", "welcome".to_string());
    app.navigation()
        .unwrap()
        .navigate_to("profile", Some(&parameters))
        .await
        .unwrap();

    let top = host.navigation_stack().pop().unwrap();
    let page = top.as_any().downcast_ref::<ProfilePage>().unwrap();
    let context = page.context.lock().unwrap().clone().unwrap();
    assert!(context.downcast::<ProfileViewModel>().is_ok());
    assert_eq!(page.greeting.lock().unwrap().as_deref(), Some("welcome"));
    assert_eq!(app.view_models().catalog().len(), 1);
}
