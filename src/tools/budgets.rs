// src/tools/budgets.rs
// Workflow steps 2 and 3: budgets/deals of a project, services of a deal

use crate::api::{Deal, DealFilter, ServiceFilter, page_size};
use crate::error::Result;
use crate::mcp::requests::{ListDealServicesRequest, ListProjectDealsRequest};
use crate::mcp::responses::{
    DealItem, DealsData, DealsOutput, Json, ServiceItem, ServicesData, ServicesOutput,
};
use crate::timesheet::{BudgetType, HierarchyContext, Selection, WorkflowStep, format_minutes};
use crate::tools::ToolContext;

/// List the deals and budgets of a project
pub async fn list_project_deals<C: ToolContext>(
    ctx: &C,
    req: ListProjectDealsRequest,
) -> Result<Json<DealsOutput>> {
    let hierarchy = HierarchyContext::from_ids(Some(req.project_id), None, None, None);
    let project_id = hierarchy
        .required(WorkflowStep::BudgetSelection, Selection::Project)?
        .to_string();

    let budget_type = req
        .budget_type
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<BudgetType>)
        .transpose()?;

    let filter = DealFilter {
        project_id: project_id.clone(),
        budget_type,
        page_size: page_size(req.limit)?,
    };
    let page = ctx.gateway().list_deals(&filter).await?;

    let kind = match budget_type {
        Some(BudgetType::Deal) => "deals",
        Some(BudgetType::Budget) => "budgets",
        None => "budgets/deals",
    };
    if page.items.is_empty() {
        return Ok(Json(DealsOutput {
            action: "list_project_deals".into(),
            message: format!("No {} found for project {}.", kind, project_id),
            data: Some(DealsData {
                project_id,
                deals: Vec::new(),
                total: 0,
                total_count: page.total_count,
            }),
        }));
    }

    let deals: Vec<DealItem> = page.items.iter().map(deal_item).collect();
    let mut response = format!("{} {} for project {}:\n", deals.len(), kind, project_id);
    for d in &deals {
        response.push_str(&format!("  [{}] {}", d.id, d.name));
        if let Some(t) = &d.budget_type {
            response.push_str(&format!(" ({})", t));
        }
        response.push('\n');
    }
    response.push_str("\nNext: pick one and call list_deal_services with its deal_id.");

    Ok(Json(DealsOutput {
        action: "list_project_deals".into(),
        message: response,
        data: Some(DealsData {
            project_id,
            total: deals.len(),
            deals,
            total_count: page.total_count,
        }),
    }))
}

fn deal_item(deal: &Deal) -> DealItem {
    let budget_type = deal.attributes.budget.map(|is_budget| {
        if is_budget {
            BudgetType::Budget.label().to_string()
        } else {
            BudgetType::Deal.label().to_string()
        }
    });
    DealItem {
        id: deal.id.clone(),
        name: deal.attributes.name.clone(),
        budget_type,
        number: deal.attributes.number.clone(),
    }
}

/// List the services of a budget/deal
pub async fn list_deal_services<C: ToolContext>(
    ctx: &C,
    req: ListDealServicesRequest,
) -> Result<Json<ServicesOutput>> {
    let hierarchy = HierarchyContext::from_ids(None, Some(req.deal_id), None, None);
    let deal_id = hierarchy
        .required(WorkflowStep::ServiceSelection, Selection::Deal)?
        .to_string();

    let filter = ServiceFilter {
        deal_id: deal_id.clone(),
        page_size: page_size(req.limit)?,
    };
    let page = ctx.gateway().list_services(&filter).await?;

    if page.items.is_empty() {
        return Ok(Json(ServicesOutput {
            action: "list_deal_services".into(),
            message: format!("No services found for deal {}.", deal_id),
            data: Some(ServicesData {
                deal_id,
                services: Vec::new(),
                total: 0,
                total_count: page.total_count,
            }),
        }));
    }

    let mut response = format!("{} services for deal {}:\n", page.items.len(), deal_id);
    let mut services = Vec::with_capacity(page.items.len());
    for s in page.items {
        let a = s.attributes;
        response.push_str(&format!("  [{}] {}", s.id, a.name));
        if let (Some(worked), Some(budgeted)) = (a.worked_time, a.budgeted_time) {
            response.push_str(&format!(
                " ({} of {} used)",
                format_minutes(worked.max(0.0).round() as u32),
                format_minutes(budgeted.max(0.0).round() as u32)
            ));
        }
        response.push('\n');
        services.push(ServiceItem {
            id: s.id,
            name: a.name,
            budgeted_time: a.budgeted_time,
            worked_time: a.worked_time,
        });
    }
    response.push_str(
        "\nNext: optionally pick a task with list_project_tasks, \
         then call create_time_entry with the service_id.",
    );

    Ok(Json(ServicesOutput {
        action: "list_deal_services".into(),
        message: response,
        data: Some(ServicesData {
            deal_id,
            total: services.len(),
            services,
            total_count: page.total_count,
        }),
    }))
}
