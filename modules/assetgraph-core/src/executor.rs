use neo4rs::query;
use tracing::warn;

use assetgraph_common::{ParamValue, ResultRow};

use crate::normalize::row_to_json;
use crate::GraphClient;

/// Binds parameters into a Cypher template, runs it against the graph
/// and projects the rows. All execution failures are contained here:
/// callers see empty rows, never an error.
pub struct QueryExecutor {
    client: GraphClient,
}

impl QueryExecutor {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    /// Execute a template and return its rows, degrading to an empty
    /// set on any transport or engine error. Not retried; the answer
    /// formatter turns empty rows into a graceful "no data" message.
    pub async fn execute(
        &self,
        template: &str,
        columns: &[&str],
        params: &[(&str, ParamValue)],
    ) -> Vec<ResultRow> {
        match self.run(template, columns, params).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Cypher execution failed, returning empty result");
                Vec::new()
            }
        }
    }

    async fn run(
        &self,
        template: &str,
        columns: &[&str],
        params: &[(&str, ParamValue)],
    ) -> Result<Vec<ResultRow>, neo4rs::Error> {
        let mut q = query(template);
        for (name, value) in params {
            q = bind_param(q, name, value);
        }

        let mut rows = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            rows.push(row_to_json(&row, columns));
        }
        Ok(rows)
    }
}

pub(crate) fn bind_param(q: neo4rs::Query, name: &str, value: &ParamValue) -> neo4rs::Query {
    match value {
        ParamValue::Str(s) => q.param(name, s.as_str()),
        ParamValue::Int(i) => q.param(name, *i),
        ParamValue::Float(f) => q.param(name, *f),
        ParamValue::FloatList(v) => {
            let list: Vec<neo4rs::BoltType> = v
                .iter()
                .map(|f| neo4rs::BoltType::Float(neo4rs::BoltFloat::new(*f)))
                .collect();
            q.param(name, list)
        }
    }
}
