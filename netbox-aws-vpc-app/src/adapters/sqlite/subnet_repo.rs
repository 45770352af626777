//! `SubnetRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, Condition, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use netbox_aws_vpc_core::error::{CoreError, CoreResult};
use netbox_aws_vpc_core::traits::SubnetRepository;
use netbox_aws_vpc_core::types::{Subnet, SubnetFilter};

use super::entity::aws_subnet;
use super::{db_error, parse_status, parse_timestamp, SqliteStore};

impl aws_subnet::Model {
    fn into_subnet(self) -> CoreResult<Subnet> {
        Ok(Subnet {
            id: self.id,
            status: parse_status(&self.status)?,
            created: parse_timestamp("created", &self.created)?,
            last_updated: parse_timestamp("last_updated", &self.last_updated)?,
            subnet_id: self.subnet_id,
            name: self.name,
            arn: self.arn,
            vpc: self.vpc_id,
            owner_account: self.owner_account_id,
            subnet_cidr: self.subnet_cidr_id,
            subnet_ipv6_cidr: self.subnet_ipv6_cidr_id,
            region: self.region_id,
            comments: self.comments,
        })
    }
}

fn subnet_to_active_model(subnet: &Subnet, with_id: bool) -> aws_subnet::ActiveModel {
    aws_subnet::ActiveModel {
        id: if with_id { Set(subnet.id) } else { NotSet },
        subnet_id: Set(subnet.subnet_id.clone()),
        name: Set(subnet.name.clone()),
        arn: Set(subnet.arn.clone()),
        status: Set(subnet.status.as_str().to_string()),
        vpc_id: Set(subnet.vpc),
        owner_account_id: Set(subnet.owner_account),
        subnet_cidr_id: Set(subnet.subnet_cidr),
        subnet_ipv6_cidr_id: Set(subnet.subnet_ipv6_cidr),
        region_id: Set(subnet.region),
        comments: Set(subnet.comments.clone()),
        created: Set(subnet.created.to_rfc3339()),
        last_updated: Set(subnet.last_updated.to_rfc3339()),
    }
}

#[async_trait]
impl SubnetRepository for SqliteStore {
    async fn find_all(&self, filter: &SubnetFilter) -> CoreResult<Vec<Subnet>> {
        let mut query = aws_subnet::Entity::find().order_by_asc(aws_subnet::Column::Id);
        if let Some(status) = filter.status {
            query = query.filter(aws_subnet::Column::Status.eq(status.as_str()));
        }
        if let Some(vpc_id) = filter.vpc_id {
            query = query.filter(aws_subnet::Column::VpcId.eq(vpc_id));
        }
        if let Some(owner) = filter.owner_account_id {
            query = query.filter(aws_subnet::Column::OwnerAccountId.eq(owner));
        }
        if let Some(region) = filter.region_id {
            query = query.filter(aws_subnet::Column::RegionId.eq(region));
        }
        if let Some(prefix) = filter.prefix_id {
            query = query.filter(
                Condition::any()
                    .add(aws_subnet::Column::SubnetCidrId.eq(prefix))
                    .add(aws_subnet::Column::SubnetIpv6CidrId.eq(prefix)),
            );
        }

        let rows = query
            .all(&self.db)
            .await
            .map_err(|e| db_error("query subnets", e))?;

        rows.into_iter().map(aws_subnet::Model::into_subnet).collect()
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Subnet>> {
        let row = aws_subnet::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("query subnet", e))?;

        row.map(aws_subnet::Model::into_subnet).transpose()
    }

    async fn find_by_subnet_id(&self, subnet_id: &str) -> CoreResult<Option<Subnet>> {
        let row = aws_subnet::Entity::find()
            .filter(aws_subnet::Column::SubnetId.eq(subnet_id))
            .one(&self.db)
            .await
            .map_err(|e| db_error("query subnet", e))?;

        row.map(aws_subnet::Model::into_subnet).transpose()
    }

    async fn insert(&self, subnet: &Subnet) -> CoreResult<Subnet> {
        subnet_to_active_model(subnet, false)
            .insert(&self.db)
            .await
            .map_err(|e| db_error("insert subnet", e))?
            .into_subnet()
    }

    async fn update(&self, subnet: &Subnet) -> CoreResult<()> {
        subnet_to_active_model(subnet, true)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CoreError::not_found("AWS subnet", subnet.id),
                e => db_error("update subnet", e),
            })?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        let result = aws_subnet::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("delete subnet", e))?;

        if result.rows_affected == 0 {
            return Err(CoreError::not_found("AWS subnet", id));
        }
        Ok(())
    }
}
