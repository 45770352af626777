//! `VpcRepository` implementation for `SqliteStore`.
//!
//! The secondary IPv4 and IPv6 CIDR sets are rows in two association tables.
//! Every write replaces the VPC row and both sets inside one transaction.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, Condition,
    ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use netbox_aws_vpc_core::error::{CoreError, CoreResult};
use netbox_aws_vpc_core::traits::VpcRepository;
use netbox_aws_vpc_core::types::{Vpc, VpcFilter};

use super::entity::{aws_vpc, vpc_ipv6_cidr, vpc_secondary_ipv4_cidr};
use super::{db_error, parse_status, parse_timestamp, SqliteStore};

/// Association rows of a batch of VPCs, grouped by VPC primary key.
#[derive(Default)]
struct CidrSets {
    secondary_ipv4: BTreeMap<i64, Vec<i64>>,
    ipv6: BTreeMap<i64, Vec<i64>>,
}

impl aws_vpc::Model {
    fn into_vpc(self, sets: &mut CidrSets) -> CoreResult<Vpc> {
        Ok(Vpc {
            id: self.id,
            status: parse_status(&self.status)?,
            created: parse_timestamp("created", &self.created)?,
            last_updated: parse_timestamp("last_updated", &self.last_updated)?,
            vpc_secondary_ipv4_cidrs: sets.secondary_ipv4.remove(&self.id).unwrap_or_default(),
            vpc_ipv6_cidrs: sets.ipv6.remove(&self.id).unwrap_or_default(),
            vpc_id: self.vpc_id,
            name: self.name,
            arn: self.arn,
            owner_account: self.owner_account_id,
            vpc_cidr: self.vpc_cidr_id,
            region: self.region_id,
            comments: self.comments,
        })
    }
}

fn vpc_to_active_model(vpc: &Vpc, with_id: bool) -> aws_vpc::ActiveModel {
    aws_vpc::ActiveModel {
        id: if with_id { Set(vpc.id) } else { NotSet },
        vpc_id: Set(vpc.vpc_id.clone()),
        name: Set(vpc.name.clone()),
        arn: Set(vpc.arn.clone()),
        status: Set(vpc.status.as_str().to_string()),
        owner_account_id: Set(vpc.owner_account),
        vpc_cidr_id: Set(vpc.vpc_cidr),
        region_id: Set(vpc.region),
        comments: Set(vpc.comments.clone()),
        created: Set(vpc.created.to_rfc3339()),
        last_updated: Set(vpc.last_updated.to_rfc3339()),
    }
}

async fn load_sets<C: ConnectionTrait>(db: &C, vpc_ids: &[i64]) -> CoreResult<CidrSets> {
    let mut sets = CidrSets::default();
    if vpc_ids.is_empty() {
        return Ok(sets);
    }

    let rows = vpc_secondary_ipv4_cidr::Entity::find()
        .filter(vpc_secondary_ipv4_cidr::Column::AwsvpcId.is_in(vpc_ids.iter().copied()))
        .order_by_asc(vpc_secondary_ipv4_cidr::Column::PrefixId)
        .all(db)
        .await
        .map_err(|e| db_error("query secondary IPv4 CIDRs", e))?;
    for row in rows {
        sets.secondary_ipv4
            .entry(row.awsvpc_id)
            .or_default()
            .push(row.prefix_id);
    }

    let rows = vpc_ipv6_cidr::Entity::find()
        .filter(vpc_ipv6_cidr::Column::AwsvpcId.is_in(vpc_ids.iter().copied()))
        .order_by_asc(vpc_ipv6_cidr::Column::PrefixId)
        .all(db)
        .await
        .map_err(|e| db_error("query IPv6 CIDRs", e))?;
    for row in rows {
        sets.ipv6.entry(row.awsvpc_id).or_default().push(row.prefix_id);
    }

    Ok(sets)
}

/// Replace both association sets of `vpc_id` with the ones on `vpc`.
async fn write_sets<C: ConnectionTrait>(db: &C, vpc_id: i64, vpc: &Vpc) -> CoreResult<()> {
    vpc_secondary_ipv4_cidr::Entity::delete_many()
        .filter(vpc_secondary_ipv4_cidr::Column::AwsvpcId.eq(vpc_id))
        .exec(db)
        .await
        .map_err(|e| db_error("clear secondary IPv4 CIDRs", e))?;
    vpc_ipv6_cidr::Entity::delete_many()
        .filter(vpc_ipv6_cidr::Column::AwsvpcId.eq(vpc_id))
        .exec(db)
        .await
        .map_err(|e| db_error("clear IPv6 CIDRs", e))?;

    if !vpc.vpc_secondary_ipv4_cidrs.is_empty() {
        let rows = vpc
            .vpc_secondary_ipv4_cidrs
            .iter()
            .map(|&prefix_id| vpc_secondary_ipv4_cidr::ActiveModel {
                awsvpc_id: Set(vpc_id),
                prefix_id: Set(prefix_id),
            });
        vpc_secondary_ipv4_cidr::Entity::insert_many(rows)
            .exec(db)
            .await
            .map_err(|e| db_error("store secondary IPv4 CIDRs", e))?;
    }

    if !vpc.vpc_ipv6_cidrs.is_empty() {
        let rows = vpc
            .vpc_ipv6_cidrs
            .iter()
            .map(|&prefix_id| vpc_ipv6_cidr::ActiveModel {
                awsvpc_id: Set(vpc_id),
                prefix_id: Set(prefix_id),
            });
        vpc_ipv6_cidr::Entity::insert_many(rows)
            .exec(db)
            .await
            .map_err(|e| db_error("store IPv6 CIDRs", e))?;
    }

    Ok(())
}

impl SqliteStore {
    async fn hydrate(&self, rows: Vec<aws_vpc::Model>) -> CoreResult<Vec<Vpc>> {
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut sets = load_sets(&self.db, &ids).await?;
        rows.into_iter().map(|row| row.into_vpc(&mut sets)).collect()
    }

    /// VPC keys with `prefix_id` in either association set.
    async fn vpcs_associated_with(&self, prefix_id: i64) -> CoreResult<Vec<i64>> {
        let mut ids: Vec<i64> = vpc_secondary_ipv4_cidr::Entity::find()
            .filter(vpc_secondary_ipv4_cidr::Column::PrefixId.eq(prefix_id))
            .all(&self.db)
            .await
            .map_err(|e| db_error("query secondary IPv4 CIDRs", e))?
            .into_iter()
            .map(|row| row.awsvpc_id)
            .collect();
        ids.extend(
            vpc_ipv6_cidr::Entity::find()
                .filter(vpc_ipv6_cidr::Column::PrefixId.eq(prefix_id))
                .all(&self.db)
                .await
                .map_err(|e| db_error("query IPv6 CIDRs", e))?
                .into_iter()
                .map(|row| row.awsvpc_id),
        );
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }
}

#[async_trait]
impl VpcRepository for SqliteStore {
    async fn find_all(&self, filter: &VpcFilter) -> CoreResult<Vec<Vpc>> {
        let mut query = aws_vpc::Entity::find().order_by_asc(aws_vpc::Column::Id);
        if let Some(status) = filter.status {
            query = query.filter(aws_vpc::Column::Status.eq(status.as_str()));
        }
        if let Some(owner) = filter.owner_account_id {
            query = query.filter(aws_vpc::Column::OwnerAccountId.eq(owner));
        }
        if let Some(region) = filter.region_id {
            query = query.filter(aws_vpc::Column::RegionId.eq(region));
        }
        if let Some(prefix) = filter.prefix_id {
            let associated = self.vpcs_associated_with(prefix).await?;
            query = query.filter(
                Condition::any()
                    .add(aws_vpc::Column::VpcCidrId.eq(prefix))
                    .add(aws_vpc::Column::Id.is_in(associated)),
            );
        }

        let rows = query
            .all(&self.db)
            .await
            .map_err(|e| db_error("query VPCs", e))?;

        self.hydrate(rows).await
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Vpc>> {
        let row = aws_vpc::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("query VPC", e))?;

        Ok(self.hydrate(row.into_iter().collect()).await?.pop())
    }

    async fn find_by_vpc_id(&self, vpc_id: &str) -> CoreResult<Option<Vpc>> {
        let row = aws_vpc::Entity::find()
            .filter(aws_vpc::Column::VpcId.eq(vpc_id))
            .one(&self.db)
            .await
            .map_err(|e| db_error("query VPC", e))?;

        Ok(self.hydrate(row.into_iter().collect()).await?.pop())
    }

    async fn insert(&self, vpc: &Vpc) -> CoreResult<Vpc> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        let model = vpc_to_active_model(vpc, false)
            .insert(&txn)
            .await
            .map_err(|e| db_error("insert VPC", e))?;
        write_sets(&txn, model.id, vpc).await?;

        txn.commit()
            .await
            .map_err(|e| db_error("commit VPC", e))?;

        let mut sets = CidrSets::default();
        sets.secondary_ipv4
            .insert(model.id, vpc.vpc_secondary_ipv4_cidrs.clone());
        sets.ipv6.insert(model.id, vpc.vpc_ipv6_cidrs.clone());
        model.into_vpc(&mut sets)
    }

    async fn update(&self, vpc: &Vpc) -> CoreResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        vpc_to_active_model(vpc, true)
            .update(&txn)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CoreError::not_found("AWS VPC", vpc.id),
                e => db_error("update VPC", e),
            })?;
        write_sets(&txn, vpc.id, vpc).await?;

        txn.commit()
            .await
            .map_err(|e| db_error("commit VPC", e))?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        vpc_secondary_ipv4_cidr::Entity::delete_many()
            .filter(vpc_secondary_ipv4_cidr::Column::AwsvpcId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("clear secondary IPv4 CIDRs", e))?;
        vpc_ipv6_cidr::Entity::delete_many()
            .filter(vpc_ipv6_cidr::Column::AwsvpcId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("clear IPv6 CIDRs", e))?;
        let result = aws_vpc::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("delete VPC", e))?;

        if result.rows_affected == 0 {
            // dropping the transaction rolls it back
            return Err(CoreError::not_found("AWS VPC", id));
        }

        txn.commit()
            .await
            .map_err(|e| db_error("commit VPC delete", e))?;
        Ok(())
    }
}
