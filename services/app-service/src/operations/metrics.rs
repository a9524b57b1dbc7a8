// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use super::site_path;
use crate::arm::ArmMetricResponse;
use crate::client::{encode_segment, ArmClient};
use crate::constants::METRICS_API_VERSION;
use crate::error::OperationResult;
use crate::mapper::to_metric_series;
use crate::model::{MetricSeries, MetricsQuery};
use http::Method;

/// Build the metrics query string (without the api version).
pub fn metrics_query_string(query: &MetricsQuery) -> String {
    let mut params = vec![
        format!("metricnames={}", encode_segment(&query.metric_names.join(","))),
        format!("aggregation={}", encode_segment(&query.aggregation)),
    ];
    if let Some(timespan) = &query.timespan {
        params.push(format!("timespan={}", encode_segment(timespan)));
    }
    if let Some(interval) = &query.interval {
        params.push(format!("interval={}", encode_segment(interval)));
    }
    params.join("&")
}

/// Platform metrics of a web app.
pub async fn get_metrics(
    client: &ArmClient,
    name: &str,
    query: &MetricsQuery,
) -> OperationResult<Vec<MetricSeries>> {
    let site = site_path(client, "get_metrics", name)?;
    let path = format!(
        "{site}/providers/microsoft.insights/metrics?{}",
        metrics_query_string(query)
    );

    let resp = client
        .send_with_api_version(Method::GET, &path, None, METRICS_API_VERSION)
        .await?
        .success()?;
    let metrics: ArmMetricResponse = resp.json()?;
    Ok(to_metric_series(&metrics))
}
