pub fn render_index(date: &str, completed: usize, total: usize) -> String {
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{COMPLETED}}", &completed.to_string())
        .replace("{{TOTAL}}", &total.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Ritual</title>
  <style>
    :root {
      --bg: #14161c;
      --card: #1d2029;
      --ink: #ecebe6;
      --muted: #8d8a82;
      --lit: #f2b04a;
      --slice: #2a2e3a;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 24px 16px 40px;
      touch-action: pan-y;
      user-select: none;
    }

    .app {
      width: min(520px, 100%);
      display: grid;
      gap: 20px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: baseline;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    .subtitle {
      color: var(--muted);
      margin: 4px 0 0;
    }

    .tabs {
      display: flex;
      gap: 6px;
    }

    .tab, button {
      background: var(--card);
      color: var(--ink);
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font: inherit;
      cursor: pointer;
    }

    .tab.active {
      background: var(--lit);
      color: var(--bg);
    }

    .view {
      display: none;
    }

    .view.active {
      display: block;
    }

    #pie {
      width: 100%;
      height: auto;
    }

    .slice {
      fill: var(--slice);
      stroke: var(--bg);
      stroke-width: 3;
    }

    .slice.lit {
      fill: var(--lit);
    }

    .slice.pressing {
      opacity: 0.7;
    }

    .slice-label {
      fill: var(--ink);
      font-size: 13px;
      pointer-events: none;
      text-anchor: middle;
    }

    #backdrop {
      fill: rgba(0, 0, 0, 0.55);
    }

    .orbital circle {
      fill: var(--lit);
      cursor: pointer;
    }

    .orbital text {
      fill: var(--bg);
      font-size: 11px;
      text-anchor: middle;
      pointer-events: none;
    }

    .notice {
      min-height: 1.4em;
      text-align: center;
      color: var(--lit);
    }

    .week-row {
      display: grid;
      grid-template-columns: 48px 1fr 32px;
      gap: 8px;
      align-items: center;
      margin-bottom: 8px;
    }

    .bar {
      display: flex;
      height: 16px;
      background: var(--card);
      border-radius: 8px;
      overflow: hidden;
    }

    .bar span {
      background: var(--lit);
      border-right: 1px solid var(--bg);
    }

    .month {
      margin-bottom: 18px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
    }

    .cell {
      aspect-ratio: 1;
      border-radius: 4px;
      background: var(--card);
      font-size: 10px;
      display: grid;
      place-items: center;
    }

    #settings {
      display: none;
      background: var(--card);
      border-radius: 16px;
      padding: 16px;
    }

    #settings.open {
      display: block;
    }

    #settings input {
      width: 100%;
      margin: 2px 0;
      background: var(--bg);
      color: var(--ink);
      border: 1px solid var(--slice);
      border-radius: 6px;
      padding: 6px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Ritual</h1>
        <p class="subtitle">{{DATE}} &middot; <span id="completed">{{COMPLETED}}</span>/{{TOTAL}}</p>
      </div>
      <button id="settings-toggle" type="button">Settings</button>
    </header>

    <nav class="tabs">
      <button class="tab" data-view="0" type="button">Ritual</button>
      <button class="tab" data-view="1" type="button">Weekly</button>
      <button class="tab" data-view="2" type="button">History</button>
    </nav>

    <section id="settings"></section>

    <section class="view" data-view="0">
      <svg id="pie" viewBox="-200 -200 400 400"></svg>
      <p class="notice" id="notice"></p>
    </section>
    <section class="view" data-view="1" id="weekly"></section>
    <section class="view" data-view="2" id="history"></section>
  </main>

  <script>
    const SVG = 'http://www.w3.org/2000/svg';
    const pie = document.getElementById('pie');
    const PIE_RADIUS = 110;
    let snapshot = null;
    let pressTimer = null;
    let pressed = false;
    let pendingDown = Promise.resolve();

    const api = async (method, path, body) => {
      const res = await fetch(path, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        throw new Error(await res.text());
      }
      return res.json();
    };

    const vibrate = (pulses) => {
      for (const ms of pulses || []) {
        try {
          navigator.vibrate && navigator.vibrate(ms);
        } catch (_) {}
      }
    };

    const el = (name, attrs) => {
      const node = document.createElementNS(SVG, name);
      for (const [key, value] of Object.entries(attrs || {})) {
        node.setAttribute(key, value);
      }
      return node;
    };

    const polar = (deg, r) => {
      const rad = (deg - 90) * Math.PI / 180;
      return [r * Math.cos(rad), r * Math.sin(rad)];
    };

    const slicePath = (i, n) => {
      const span = 360 / n;
      const [x0, y0] = polar(i * span, PIE_RADIUS);
      const [x1, y1] = polar((i + 1) * span, PIE_RADIUS);
      const [ix0, iy0] = polar(i * span, 40);
      const [ix1, iy1] = polar((i + 1) * span, 40);
      return `M${ix0},${iy0} L${x0},${y0} A${PIE_RADIUS},${PIE_RADIUS} 0 0 1 ${x1},${y1} L${ix1},${iy1} A40,40 0 0 0 ${ix0},${iy0} Z`;
    };

    const gesture = (body) => api('POST', '/api/gesture', body).then(apply);

    // Tracked locally: the release may come before the press round trip finishes.
    const release = (type) => {
      if (!pressed) return;
      pressed = false;
      clearTimeout(pressTimer);
      pendingDown
        .then(() => gesture({ type }))
        .catch(console.error);
    };

    window.addEventListener('pointerup', () => release('pointer_up'));

    const drawPie = () => {
      pie.replaceChildren();
      const n = snapshot.categories.length;
      snapshot.categories.forEach((category, i) => {
        const cls = ['slice'];
        if (category.lit) cls.push('lit');
        if (snapshot.pressing_slice === i) cls.push('pressing');
        const path = el('path', { d: slicePath(i, n), class: cls.join(' ') });
        path.addEventListener('pointerdown', (event) => {
          event.preventDefault();
          pressed = true;
          pendingDown = gesture({ type: 'pointer_down', slice: i }).catch(console.error);
          clearTimeout(pressTimer);
          pressTimer = setTimeout(() => api('GET', '/api/ritual').then(apply), 420);
        });
        path.addEventListener('pointerleave', () => release('pointer_leave'));
        path.addEventListener('pointercancel', () => release('pointer_cancel'));
        pie.appendChild(path);
        const [lx, ly] = polar((i + 0.5) * 360 / n, 78);
        const label = el('text', { x: lx, y: ly, class: 'slice-label' });
        label.textContent = category.label;
        pie.appendChild(label);
      });

      if (snapshot.active_slice !== null) {
        const backdrop = el('rect', { id: 'backdrop', x: -200, y: -200, width: 400, height: 400 });
        backdrop.addEventListener('click', () => gesture({ type: 'backdrop_tap' }).catch(console.error));
        pie.appendChild(backdrop);
        for (const orbital of snapshot.orbital_positions) {
          const group = el('g', { class: 'orbital' });
          group.appendChild(el('circle', { cx: orbital.x, cy: orbital.y, r: 30 }));
          const text = el('text', { x: orbital.x, y: orbital.y + 4 });
          text.textContent = orbital.name;
          group.appendChild(text);
          group.addEventListener('click', (event) => {
            event.stopPropagation();
            gesture({ type: 'select_orbital', orbital: orbital.name })
              .then(refreshCharts)
              .catch(console.error);
          });
          pie.appendChild(group);
        }
      }
    };

    const drawWeekly = (table) => {
      const root = document.getElementById('weekly');
      root.replaceChildren();
      for (const row of table.rows) {
        const line = document.createElement('div');
        line.className = 'week-row';
        const bar = document.createElement('div');
        bar.className = 'bar';
        row.counts.forEach((count) => {
          if (count > 0) {
            const seg = document.createElement('span');
            seg.style.flex = String(count);
            bar.appendChild(seg);
          }
        });
        const pad = document.createElement('span');
        pad.style.flex = String(Math.max(0, 24 - row.total));
        pad.style.background = 'transparent';
        bar.appendChild(pad);
        line.innerHTML = `<span>${row.weekday}</span>`;
        line.appendChild(bar);
        line.insertAdjacentHTML('beforeend', `<span>${row.total}</span>`);
        root.appendChild(line);
      }
    };

    const drawHistory = (history) => {
      const root = document.getElementById('history');
      root.replaceChildren();
      for (const month of history.months) {
        const block = document.createElement('div');
        block.className = 'month';
        block.innerHTML = `<h3>${month.label}</h3>`;
        const grid = document.createElement('div');
        grid.className = 'grid';
        for (let i = 0; i < month.first_weekday; i++) {
          grid.appendChild(document.createElement('span'));
        }
        for (const day of month.days) {
          const cell = document.createElement('span');
          cell.className = 'cell';
          cell.title = day.categories.join(', ');
          cell.style.background = day.count
            ? `rgba(242, 176, 74, ${0.15 + 0.85 * day.count / 8})`
            : '';
          cell.textContent = Number(day.date.slice(8));
          grid.appendChild(cell);
        }
        block.appendChild(grid);
        root.appendChild(block);
      }
    };

    const drawSettings = (settings) => {
      const root = document.getElementById('settings');
      root.classList.toggle('open', settings.open);
      if (!settings.open) {
        root.replaceChildren();
        return;
      }
      root.replaceChildren();
      for (const [category, names] of Object.entries(settings.draft)) {
        const heading = document.createElement('h4');
        heading.textContent = category;
        root.appendChild(heading);
        names.forEach((name, index) => {
          const input = document.createElement('input');
          input.value = name;
          input.addEventListener('change', () =>
            api('PUT', '/api/settings/draft', { category, index, name: input.value })
              .then(drawSettings)
              .catch(console.error));
          root.appendChild(input);
        });
      }
      const save = document.createElement('button');
      save.textContent = settings.saved_flash ? 'Saved' : 'Save';
      save.addEventListener('click', () =>
        api('POST', '/api/settings/save').then((next) => {
          drawSettings(next);
          setTimeout(() => api('GET', '/api/settings').then(drawSettings), 1600);
          return refresh();
        }).catch(console.error));
      const clear = document.createElement('button');
      clear.textContent = 'Clear all data';
      clear.addEventListener('click', async () => {
        await api('POST', '/api/settings/clear/request');
        const path = window.confirm('Delete every logged activity?')
          ? '/api/settings/clear/confirm'
          : '/api/settings/clear/cancel';
        drawSettings(await api('POST', path));
        await refresh();
      });
      root.append(save, clear);
    };

    const apply = (next) => {
      snapshot = next;
      vibrate(next.haptics);
      document.getElementById('completed').textContent = next.completed;
      document.getElementById('notice').textContent = next.notice
        ? `${next.notice.category_id} · ${next.notice.orbital}`
        : '';
      if (next.notice) {
        setTimeout(() => api('GET', '/api/ritual').then(apply), 2100);
      }
      document.querySelectorAll('.tab').forEach((tab) =>
        tab.classList.toggle('active', Number(tab.dataset.view) === next.view));
      document.querySelectorAll('.view').forEach((view) =>
        view.classList.toggle('active', Number(view.dataset.view) === next.view));
      drawPie();
    };

    const refreshCharts = async () => {
      const [weekly, history] = await Promise.all([
        api('GET', '/api/weekly'),
        api('GET', '/api/history')
      ]);
      drawWeekly(weekly);
      drawHistory(history);
    };

    const refresh = async () => {
      apply(await api('GET', '/api/ritual'));
      await refreshCharts();
    };

    document.querySelectorAll('.tab').forEach((tab) => {
      tab.addEventListener('click', () =>
        api('POST', '/api/view', { type: 'tab', index: Number(tab.dataset.view) })
          .then(apply)
          .catch(console.error));
    });

    let touchX = null;
    document.addEventListener('touchstart', (event) => {
      touchX = event.touches[0].clientX;
    });
    document.addEventListener('touchend', (event) => {
      if (touchX === null) return;
      const dx = event.changedTouches[0].clientX - touchX;
      touchX = null;
      api('POST', '/api/view', { type: 'swipe', dx }).then(apply).catch(console.error);
    });

    document.getElementById('settings-toggle').addEventListener('click', async () => {
      const current = await api('GET', '/api/settings');
      const path = current.open ? '/api/settings/close' : '/api/settings/open';
      drawSettings(await api('POST', path));
    });

    refresh().catch(console.error);
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_fills_placeholders() {
        let html = render_index("2024-06-10", 3, 8);
        assert!(html.contains("2024-06-10"));
        assert!(html.contains(r#"<span id="completed">3</span>/8"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn release_follows_the_local_press_not_the_snapshot() {
        let html = render_index("2024-06-10", 0, 8);
        assert!(html.contains("pressed = true;"));
        assert!(html.contains("if (!pressed) return;"));
        assert!(html.contains("pendingDown\n        .then(() => gesture({ type }))"));
        assert!(!html.contains("snapshot.gesture === 'pressing'"));
    }
}
