#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `SqliteStore`: every repository trait plus the
//! schema constraints backing the service checks.

use netbox_aws_vpc_app::adapters::SqliteStore;
use netbox_aws_vpc_core::error::CoreError;
use netbox_aws_vpc_core::traits::{
    AccountRepository, PrefixRepository, RegionRepository, SubnetRepository, TenantRepository,
    VpcRepository,
};
use netbox_aws_vpc_core::types::{
    Account, AccountFilter, AwsStatus, Prefix, Region, Subnet, SubnetFilter, Tenant, Vpc,
    VpcFilter,
};

// ===== Helpers =====

async fn create_test_store() -> (SqliteStore, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = tmp.path().join("nested").join("test.db");
    let store = SqliteStore::new(&db_path)
        .await
        .expect("failed to create SqliteStore");
    (store, tmp)
}

fn make_account(account_id: &str) -> Account {
    let now = chrono::Utc::now();
    Account {
        id: 0,
        account_id: account_id.to_string(),
        arn: None,
        name: format!("Test Account {account_id}"),
        description: String::new(),
        status: AwsStatus::Active,
        tenant: None,
        comments: String::new(),
        created: now,
        last_updated: now,
    }
}

fn make_vpc(vpc_id: &str, owner: i64) -> Vpc {
    let now = chrono::Utc::now();
    Vpc {
        id: 0,
        vpc_id: vpc_id.to_string(),
        name: "Test VPC".to_string(),
        arn: None,
        status: AwsStatus::Active,
        owner_account: owner,
        vpc_cidr: None,
        vpc_secondary_ipv4_cidrs: Vec::new(),
        vpc_ipv6_cidrs: Vec::new(),
        region: None,
        comments: String::new(),
        created: now,
        last_updated: now,
    }
}

fn make_subnet(subnet_id: &str, vpc: i64, owner: i64) -> Subnet {
    let now = chrono::Utc::now();
    Subnet {
        id: 0,
        subnet_id: subnet_id.to_string(),
        name: "Test Subnet".to_string(),
        arn: None,
        status: AwsStatus::Active,
        vpc,
        owner_account: owner,
        subnet_cidr: None,
        subnet_ipv6_cidr: None,
        region: None,
        comments: String::new(),
        created: now,
        last_updated: now,
    }
}

async fn add_prefix(store: &SqliteStore, cidr: &str) -> Prefix {
    let now = chrono::Utc::now();
    PrefixRepository::insert(
        store,
        &Prefix {
            id: 0,
            prefix: cidr.parse().unwrap(),
            description: String::new(),
            created: now,
            last_updated: now,
        },
    )
    .await
    .unwrap()
}

async fn add_tenant(store: &SqliteStore, slug: &str) -> Tenant {
    let now = chrono::Utc::now();
    TenantRepository::insert(
        store,
        &Tenant {
            id: 0,
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            created: now,
            last_updated: now,
        },
    )
    .await
    .unwrap()
}

async fn add_region(store: &SqliteStore, slug: &str) -> Region {
    let now = chrono::Utc::now();
    RegionRepository::insert(
        store,
        &Region {
            id: 0,
            name: slug.to_string(),
            slug: slug.to_string(),
            created: now,
            last_updated: now,
        },
    )
    .await
    .unwrap()
}

// ===== AccountRepository Tests =====

#[tokio::test]
async fn account_find_all_empty() {
    let (store, _tmp) = create_test_store().await;
    let accounts = AccountRepository::find_all(&store, &AccountFilter::default())
        .await
        .unwrap();
    assert!(accounts.is_empty());
}

#[tokio::test]
async fn account_insert_assigns_id_and_round_trips() {
    let (store, _tmp) = create_test_store().await;
    let tenant = add_tenant(&store, "acme").await;

    let mut account = make_account("123456789012");
    account.tenant = Some(tenant.id);
    account.status = AwsStatus::PendingActivation;
    account.arn = Some("arn:aws:organizations::123456789012:account/o-1/123456789012".into());
    let stored = AccountRepository::insert(&store, &account).await.unwrap();
    assert!(stored.id > 0);

    let found = AccountRepository::find_by_id(&store, stored.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.account_id, "123456789012");
    assert_eq!(found.tenant, Some(tenant.id));
    assert_eq!(found.status, AwsStatus::PendingActivation);
    assert_eq!(found.arn, account.arn);
    assert_eq!(found.created.timestamp(), account.created.timestamp());

    let by_number = store
        .find_by_account_id("123456789012")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_number.id, stored.id);
}

#[tokio::test]
async fn account_filter_by_status_and_tenant() {
    let (store, _tmp) = create_test_store().await;
    let tenant = add_tenant(&store, "acme").await;

    let mut a = make_account("111111111111");
    a.tenant = Some(tenant.id);
    AccountRepository::insert(&store, &a).await.unwrap();
    let mut b = make_account("222222222222");
    b.status = AwsStatus::Inactive;
    AccountRepository::insert(&store, &b).await.unwrap();

    let by_tenant = AccountRepository::find_all(
        &store,
        &AccountFilter {
            tenant_id: Some(tenant.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_tenant.len(), 1);
    assert_eq!(by_tenant[0].account_id, "111111111111");

    let inactive = AccountRepository::find_all(
        &store,
        &AccountFilter {
            status: Some(AwsStatus::Inactive),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].account_id, "222222222222");
}

#[tokio::test]
async fn account_duplicate_number_is_validation_error() {
    let (store, _tmp) = create_test_store().await;
    AccountRepository::insert(&store, &make_account("123456789012"))
        .await
        .unwrap();

    let err = AccountRepository::insert(&store, &make_account("123456789012"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(ref e) if e.has("account_id")));
}

#[tokio::test]
async fn account_update_and_delete_missing_are_not_found() {
    let (store, _tmp) = create_test_store().await;
    let mut ghost = make_account("123456789012");
    ghost.id = 99;

    assert!(matches!(
        AccountRepository::update(&store, &ghost).await,
        Err(CoreError::NotFound { .. })
    ));
    assert!(matches!(
        AccountRepository::delete(&store, 99).await,
        Err(CoreError::NotFound { .. })
    ));
}

#[tokio::test]
async fn account_update_overwrites_fields() {
    let (store, _tmp) = create_test_store().await;
    let mut account = AccountRepository::insert(&store, &make_account("123456789012"))
        .await
        .unwrap();

    account.name = "Updated Account".to_string();
    account.description = "prod".to_string();
    AccountRepository::update(&store, &account).await.unwrap();

    let found = AccountRepository::find_by_id(&store, account.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "Updated Account");
    assert_eq!(found.description, "prod");
}

// ===== VpcRepository Tests =====

#[tokio::test]
async fn vpc_sets_round_trip() {
    let (store, _tmp) = create_test_store().await;
    let owner = AccountRepository::insert(&store, &make_account("123456789012"))
        .await
        .unwrap();
    let primary = add_prefix(&store, "10.0.0.0/16").await;
    let secondary = add_prefix(&store, "10.1.0.0/16").await;
    let v6 = add_prefix(&store, "2600:1f18:286d:f300::/56").await;

    let mut vpc = make_vpc("vpc-1234567890abcdef0", owner.id);
    vpc.vpc_cidr = Some(primary.id);
    vpc.vpc_secondary_ipv4_cidrs = vec![secondary.id];
    vpc.vpc_ipv6_cidrs = vec![v6.id];
    let stored = VpcRepository::insert(&store, &vpc).await.unwrap();
    assert_eq!(stored.vpc_ipv6_cidrs, vec![v6.id]);

    let found = VpcRepository::find_by_id(&store, stored.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.vpc_cidr, Some(primary.id));
    assert_eq!(found.vpc_secondary_ipv4_cidrs, vec![secondary.id]);
    assert_eq!(found.vpc_ipv6_cidrs, vec![v6.id]);

    let by_vpc_id = store
        .find_by_vpc_id("vpc-1234567890abcdef0")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_vpc_id, found);
}

#[tokio::test]
async fn vpc_update_replaces_sets() {
    let (store, _tmp) = create_test_store().await;
    let owner = AccountRepository::insert(&store, &make_account("123456789012"))
        .await
        .unwrap();
    let a = add_prefix(&store, "10.1.0.0/16").await;
    let b = add_prefix(&store, "10.2.0.0/16").await;

    let mut vpc = make_vpc("vpc-12345678", owner.id);
    vpc.vpc_secondary_ipv4_cidrs = vec![a.id];
    let mut vpc = VpcRepository::insert(&store, &vpc).await.unwrap();

    vpc.vpc_secondary_ipv4_cidrs = vec![b.id];
    vpc.name = "renamed".to_string();
    VpcRepository::update(&store, &vpc).await.unwrap();

    let found = VpcRepository::find_by_id(&store, vpc.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.vpc_secondary_ipv4_cidrs, vec![b.id]);
    assert!(found.vpc_ipv6_cidrs.is_empty());
    assert_eq!(found.name, "renamed");
}

#[tokio::test]
async fn vpc_filter_by_prefix_covers_every_cidr_field() {
    let (store, _tmp) = create_test_store().await;
    let owner = AccountRepository::insert(&store, &make_account("123456789012"))
        .await
        .unwrap();
    let primary = add_prefix(&store, "10.0.0.0/16").await;
    let v6 = add_prefix(&store, "2001:db8::/56").await;
    let unused = add_prefix(&store, "192.168.0.0/24").await;
    let region = add_region(&store, "us-east-1").await;

    let mut first = make_vpc("vpc-aaaaaaaa", owner.id);
    first.vpc_cidr = Some(primary.id);
    first.region = Some(region.id);
    let first = VpcRepository::insert(&store, &first).await.unwrap();
    let mut second = make_vpc("vpc-bbbbbbbb", owner.id);
    second.vpc_ipv6_cidrs = vec![v6.id];
    let second = VpcRepository::insert(&store, &second).await.unwrap();

    let find = |prefix_id| {
        let store = &store;
        async move {
            VpcRepository::find_all(
                store,
                &VpcFilter {
                    prefix_id: Some(prefix_id),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect::<Vec<_>>()
        }
    };
    assert_eq!(find(primary.id).await, vec![first.id]);
    assert_eq!(find(v6.id).await, vec![second.id]);
    assert!(find(unused.id).await.is_empty());

    let in_region = VpcRepository::find_all(
        &store,
        &VpcFilter {
            region_id: Some(region.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(in_region.len(), 1);
    assert_eq!(in_region[0].id, first.id);
}

#[tokio::test]
async fn vpc_delete_keeps_prefixes() {
    let (store, _tmp) = create_test_store().await;
    let owner = AccountRepository::insert(&store, &make_account("123456789012"))
        .await
        .unwrap();
    let v6 = add_prefix(&store, "2001:db8::/56").await;

    let mut vpc = make_vpc("vpc-12345678", owner.id);
    vpc.vpc_ipv6_cidrs = vec![v6.id];
    let vpc = VpcRepository::insert(&store, &vpc).await.unwrap();

    VpcRepository::delete(&store, vpc.id).await.unwrap();
    assert!(VpcRepository::find_by_id(&store, vpc.id)
        .await
        .unwrap()
        .is_none());
    assert!(PrefixRepository::find_by_id(&store, v6.id)
        .await
        .unwrap()
        .is_some());
    // the association row went with the VPC, so the prefix is free again
    PrefixRepository::delete(&store, v6.id).await.unwrap();

    assert!(matches!(
        VpcRepository::delete(&store, vpc.id).await,
        Err(CoreError::NotFound { .. })
    ));
}

// ===== Foreign keys =====

#[tokio::test]
async fn referenced_rows_cannot_be_deleted() {
    let (store, _tmp) = create_test_store().await;
    let owner = AccountRepository::insert(&store, &make_account("123456789012"))
        .await
        .unwrap();
    let prefix = add_prefix(&store, "10.0.0.0/16").await;

    let mut vpc = make_vpc("vpc-12345678", owner.id);
    vpc.vpc_secondary_ipv4_cidrs = vec![prefix.id];
    let vpc = VpcRepository::insert(&store, &vpc).await.unwrap();
    SubnetRepository::insert(&store, &make_subnet("subnet-12345678", vpc.id, owner.id))
        .await
        .unwrap();

    assert!(matches!(
        PrefixRepository::delete(&store, prefix.id).await,
        Err(CoreError::Integrity(_))
    ));
    assert!(matches!(
        AccountRepository::delete(&store, owner.id).await,
        Err(CoreError::Integrity(_))
    ));
    assert!(matches!(
        VpcRepository::delete(&store, vpc.id).await,
        Err(CoreError::Integrity(_))
    ));
    // the failed delete rolled back, sets included
    let found = VpcRepository::find_by_id(&store, vpc.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.vpc_secondary_ipv4_cidrs, vec![prefix.id]);
}

#[tokio::test]
async fn dangling_reference_is_rejected() {
    let (store, _tmp) = create_test_store().await;
    let err = VpcRepository::insert(&store, &make_vpc("vpc-12345678", 42))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Integrity(_)));
    assert!(VpcRepository::find_all(&store, &VpcFilter::default())
        .await
        .unwrap()
        .is_empty());
}

// ===== SubnetRepository Tests =====

#[tokio::test]
async fn subnet_round_trip_and_filters() {
    let (store, _tmp) = create_test_store().await;
    let owner = AccountRepository::insert(&store, &make_account("123456789012"))
        .await
        .unwrap();
    let vpc = VpcRepository::insert(&store, &make_vpc("vpc-12345678", owner.id))
        .await
        .unwrap();
    let v4 = add_prefix(&store, "10.0.1.0/24").await;
    let v6 = add_prefix(&store, "2001:db8::/64").await;

    let mut subnet = make_subnet("subnet-0123456789abcdef0", vpc.id, owner.id);
    subnet.subnet_cidr = Some(v4.id);
    subnet.subnet_ipv6_cidr = Some(v6.id);
    let stored = SubnetRepository::insert(&store, &subnet).await.unwrap();

    let found = store
        .find_by_subnet_id("subnet-0123456789abcdef0")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, stored.id);
    assert_eq!(found.subnet_ipv6_cidr, Some(v6.id));

    for filter in [
        SubnetFilter {
            vpc_id: Some(vpc.id),
            ..Default::default()
        },
        SubnetFilter {
            prefix_id: Some(v6.id),
            ..Default::default()
        },
        SubnetFilter {
            owner_account_id: Some(owner.id),
            status: Some(AwsStatus::Active),
            ..Default::default()
        },
    ] {
        let subnets = SubnetRepository::find_all(&store, &filter).await.unwrap();
        assert_eq!(subnets.len(), 1, "{filter:?}");
    }

    let none = SubnetRepository::find_all(
        &store,
        &SubnetFilter {
            vpc_id: Some(vpc.id + 1),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(none.is_empty());

    SubnetRepository::delete(&store, stored.id).await.unwrap();
    assert!(SubnetRepository::find_by_id(&store, stored.id)
        .await
        .unwrap()
        .is_none());
}

// ===== Reference repositories =====

#[tokio::test]
async fn prefix_text_is_preserved() {
    let (store, _tmp) = create_test_store().await;
    let prefix = add_prefix(&store, "2600:1f18:286d:f300::/56").await;

    let all = PrefixRepository::find_all(&store).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].to_string(), "2600:1f18:286d:f300::/56");
    assert_eq!(all[0].id, prefix.id);
}

#[tokio::test]
async fn tenant_and_region_slugs_are_unique() {
    let (store, _tmp) = create_test_store().await;
    let tenant = add_tenant(&store, "acme").await;
    let region = add_region(&store, "us-east-1").await;

    assert_eq!(
        TenantRepository::find_by_slug(&store, "acme")
            .await
            .unwrap()
            .unwrap()
            .id,
        tenant.id
    );
    assert_eq!(
        RegionRepository::find_by_slug(&store, "us-east-1")
            .await
            .unwrap()
            .unwrap()
            .id,
        region.id
    );

    let now = chrono::Utc::now();
    let err = TenantRepository::insert(
        &store,
        &Tenant {
            id: 0,
            name: "Other".to_string(),
            slug: "acme".to_string(),
            created: now,
            last_updated: now,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::Validation(ref e) if e.has("slug")));

    TenantRepository::delete(&store, tenant.id).await.unwrap();
    RegionRepository::delete(&store, region.id).await.unwrap();
    assert!(TenantRepository::find_all(&store).await.unwrap().is_empty());
    assert!(RegionRepository::find_all(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn reopening_keeps_data() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("test.db");
    {
        let store = SqliteStore::new(&db_path).await.unwrap();
        AccountRepository::insert(&store, &make_account("123456789012"))
            .await
            .unwrap();
    }

    let store = SqliteStore::new(&db_path).await.unwrap();
    let accounts = AccountRepository::find_all(&store, &AccountFilter::default())
        .await
        .unwrap();
    assert_eq!(accounts.len(), 1);
}
