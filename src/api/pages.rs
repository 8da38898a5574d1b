//! Embedded HTML shells for the two served pages
//!
//! The pages are thin clients: credentials live in the browser's
//! localStorage and are attached to API calls as headers, never stored
//! server-side.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8">
  <title>Consulta de CNPJs</title>
</head>
<body>
  <h1>Consulta de CNPJs</h1>
  <p><a href="/config">Configurar credenciais</a></p>
  <form id="search-form">
    <label for="cnpjs">CNPJs (um por linha):</label><br>
    <textarea id="cnpjs" name="cnpjs" rows="10" cols="40"></textarea><br>
    <label for="type">Tipo de consulta:</label>
    <select id="type" name="type">
      <option value="empresas" selected>Empresas</option>
      <option value="pessoas">Pessoas</option>
    </select><br>
    <button type="submit">Consultar</button>
  </form>
  <div id="actions" hidden>
    <button id="download-xlsx">Baixar planilha</button>
    <button id="download-json">Baixar JSON</button>
    <button id="analyze">Análise de risco</button>
  </div>
  <pre id="output"></pre>
  <script>
    let lastResults = null;
    const credentialHeaders = () => ({
      'X-BigData-TokenId': localStorage.getItem('bigdata_token_id') || '',
      'X-BigData-TokenHash': localStorage.getItem('bigdata_token_hash') || '',
      'X-OpenAI-Key': localStorage.getItem('openai_key') || ''
    });

    document.getElementById('search-form').addEventListener('submit', async (e) => {
      e.preventDefault();
      const body = new URLSearchParams(new FormData(e.target));
      const response = await fetch('/search', {
        method: 'POST',
        headers: credentialHeaders(),
        body
      });
      lastResults = await response.json();
      document.getElementById('output').textContent = JSON.stringify(lastResults, null, 2);
      document.getElementById('actions').hidden = !response.ok;
    });

    const postResults = async (path) => fetch(path, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json', ...credentialHeaders() },
      body: JSON.stringify(lastResults)
    });

    const downloadFrom = async (path) => {
      const response = await postResults(path);
      if (!response.ok) return;
      const disposition = response.headers.get('Content-Disposition') || '';
      const name = (disposition.match(/filename="(.+)"/) || [])[1] || 'resultado';
      const url = URL.createObjectURL(await response.blob());
      const link = document.createElement('a');
      link.href = url;
      link.download = name;
      link.click();
      URL.revokeObjectURL(url);
    };

    document.getElementById('download-xlsx').addEventListener('click', () => downloadFrom('/download'));
    document.getElementById('download-json').addEventListener('click', () => downloadFrom('/download_json'));
    document.getElementById('analyze').addEventListener('click', async () => {
      const response = await postResults('/analyze_gpt');
      const body = await response.json();
      document.getElementById('output').textContent = body.analysis || body.message || '';
    });
  </script>
</body>
</html>
"#;

pub const CONFIG_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8">
  <title>Configuração de Credenciais</title>
</head>
<body>
  <h1>Configuração de Credenciais</h1>
  <p><a href="/">Voltar à consulta</a></p>
  <form id="config-form">
    <label for="token-id">BigDataCorp Token ID:</label><br>
    <input id="token-id" type="text" size="50"><br>
    <label for="token-hash">BigDataCorp Token Hash:</label><br>
    <input id="token-hash" type="password" size="50"><br>
    <label for="openai-key">OpenAI API Key:</label><br>
    <input id="openai-key" type="password" size="50"><br>
    <button type="submit">Salvar</button>
  </form>
  <script>
    const fields = {
      'token-id': 'bigdata_token_id',
      'token-hash': 'bigdata_token_hash',
      'openai-key': 'openai_key'
    };
    for (const [id, key] of Object.entries(fields)) {
      document.getElementById(id).value = localStorage.getItem(key) || '';
    }
    document.getElementById('config-form').addEventListener('submit', (e) => {
      e.preventDefault();
      for (const [id, key] of Object.entries(fields)) {
        localStorage.setItem(key, document.getElementById(id).value.trim());
      }
      alert('Credenciais salvas no navegador.');
    });
  </script>
</body>
</html>
"#;
